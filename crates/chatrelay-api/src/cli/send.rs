//! `chatrelay send` -- one chat exchange from the command line.

use anyhow::Result;
use console::style;

use chatrelay_core::client::ChatClient;
use chatrelay_infra::webhook::WebhookClient;
use chatrelay_types::chat::ChatReply;
use chatrelay_types::config::ClientConfig;

/// Send `message` and print the reply.
pub async fn send(config: ClientConfig, message: &str, json: bool) -> Result<()> {
    let client = WebhookClient::new(config);
    let reply = client.send_message(message).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ChatReply { reply })?);
    } else {
        println!();
        println!("  {} {}", style("🤖").bold(), reply);
        println!();
    }

    Ok(())
}
