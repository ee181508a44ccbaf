//! `chatrelay config` -- show what the client and servers would use.

use std::path::Path;

use anyhow::Result;
use console::style;

use chatrelay_infra::webhook::WebhookClient;
use chatrelay_types::config::RelayFileConfig;

/// Print the resolved configuration and the client's endpoint.
pub fn show(config: &RelayFileConfig, data_dir: &Path, json: bool) -> Result<()> {
    let client = WebhookClient::new(config.client.clone());
    let endpoint = client.endpoint_url().map(|u| u.to_string());

    if json {
        let out = serde_json::json!({
            "data_dir": data_dir.display().to_string(),
            "config": config,
            "endpoint": endpoint.as_ref().ok(),
            "endpoint_error": endpoint.as_ref().err().map(|e| e.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let or_unset = |v: &Option<String>| v.clone().unwrap_or_else(|| "(unset)".to_string());

    println!();
    println!("  {}", style("── Client ──").dim());
    println!("  Mode:        {}", style(config.client.mode).bold());
    println!("  Webhook URL: {}", or_unset(&config.client.webhook_url));
    println!("  Proxy URL:   {}", or_unset(&config.client.proxy_url));
    println!("  Origin:      {}", config.client.app_origin);
    match &endpoint {
        Ok(url) => println!("  Endpoint:    {}", style(url).cyan()),
        Err(e) => println!("  Endpoint:    {}", style(e).red()),
    }
    println!();
    println!("  {}", style("── Server ──").dim());
    println!("  Listen:      {}:{}", config.server.host, config.server.port);
    println!("  Upstream:    {}", or_unset(&config.server.upstream_url));
    println!("  Web dir:     {}", or_unset(&config.server.web_dir));
    println!();
    println!("  {}", style("── Dev proxy ──").dim());
    println!("  Listen:      {}:{}", config.dev_proxy.host, config.dev_proxy.port);
    println!("  Target:      {}", config.dev_proxy.target);
    println!();
    println!("  Data dir:    {}", style(data_dir.display()).dim());
    println!();

    Ok(())
}
