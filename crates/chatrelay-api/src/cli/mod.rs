//! CLI command definitions and dispatch for the `chatrelay` binary.
//!
//! Uses clap derive macros for argument parsing. Flags given here take
//! precedence over environment variables and `config.toml`.

pub mod config;
pub mod send;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use chatrelay_types::config::{BuildMode, RelayFileConfig};

/// Relay chat messages to an automation webhook.
#[derive(Parser)]
#[command(name = "chatrelay", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send one message to the webhook and print the reply.
    Send {
        /// The chat message.
        message: String,

        #[command(flatten)]
        client: ClientArgs,
    },

    /// Run the production proxy passthrough server.
    Serve {
        /// Address to bind.
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on.
        #[arg(long, short)]
        port: Option<u16>,

        /// Upstream webhook the passthrough forwards to.
        #[arg(long)]
        upstream_url: Option<String>,
    },

    /// Run the development proxy that strips `/api` and forwards to the webhook host.
    #[command(name = "dev-proxy")]
    DevProxy {
        /// Address to bind.
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on.
        #[arg(long, short)]
        port: Option<u16>,

        /// Where rewritten requests are sent (e.g. your n8n or tunnel URL).
        #[arg(long)]
        target: Option<String>,
    },

    /// Show the resolved configuration and webhook endpoint.
    Config {
        #[command(flatten)]
        client: ClientArgs,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Client overrides shared by `send` and `config`.
#[derive(Args, Debug, Default)]
pub struct ClientArgs {
    /// Build mode: production (via proxy) or development (direct).
    #[arg(long)]
    pub mode: Option<BuildMode>,

    /// Direct webhook URL (development).
    #[arg(long)]
    pub webhook_url: Option<String>,

    /// Proxy path or URL (production).
    #[arg(long)]
    pub proxy_url: Option<String>,

    /// Origin relative endpoints are resolved against.
    #[arg(long)]
    pub origin: Option<String>,
}

impl ClientArgs {
    /// Layer these flags over `config`.
    pub fn apply(self, config: &mut RelayFileConfig) {
        if let Some(mode) = self.mode {
            config.client.mode = mode;
        }
        if let Some(url) = self.webhook_url {
            config.client.webhook_url = Some(url);
        }
        if let Some(path) = self.proxy_url {
            config.client.proxy_url = Some(path);
        }
        if let Some(origin) = self.origin {
            config.client.app_origin = origin;
        }
    }
}
