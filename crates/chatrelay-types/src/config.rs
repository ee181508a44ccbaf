//! Configuration types for chatrelay.
//!
//! `RelayFileConfig` mirrors the optional `config.toml` in the data
//! directory. Every field has a default, so an empty file (or no file at
//! all) yields a usable development configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default origin the client joins relative endpoints onto. Matches the
/// default `serve` bind address.
pub const DEFAULT_APP_ORIGIN: &str = "http://127.0.0.1:8787";

/// Build mode selecting how the client reaches the webhook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Requests go through the proxy passthrough.
    #[serde(alias = "prod")]
    Production,
    /// Requests go straight to the configured webhook URL.
    #[default]
    #[serde(alias = "dev")]
    Development,
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Production => write!(f, "production"),
            BuildMode::Development => write!(f, "development"),
        }
    }
}

impl FromStr for BuildMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(BuildMode::Production),
            "development" | "dev" => Ok(BuildMode::Development),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

/// Everything the webhook client needs to pick an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub mode: BuildMode,

    /// Direct webhook URL, used in development mode.
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Proxy path override, used in production mode.
    #[serde(default)]
    pub proxy_url: Option<String>,

    /// Origin that relative endpoints are resolved against.
    #[serde(default = "default_app_origin")]
    pub app_origin: String,
}

fn default_app_origin() -> String {
    DEFAULT_APP_ORIGIN.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            mode: BuildMode::default(),
            webhook_url: None,
            proxy_url: None,
            app_origin: default_app_origin(),
        }
    }
}

/// `[server]` section: the production proxy passthrough host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Webhook the upstream forwarder posts to (`N8N_WEBHOOK_URL`).
    #[serde(default)]
    pub upstream_url: Option<String>,

    /// Built chat UI to serve as static files, if any.
    #[serde(default)]
    pub web_dir: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8787
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_server_port(),
            upstream_url: None,
            web_dir: None,
        }
    }
}

/// `[dev_proxy]` section: the development path-rewrite proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevProxyConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_dev_port")]
    pub port: u16,

    /// Where rewritten `/api/...` requests are sent.
    #[serde(default = "default_dev_target")]
    pub target: String,
}

fn default_dev_port() -> u16 {
    5173
}

fn default_dev_target() -> String {
    "http://localhost:5678".to_string()
}

impl Default for DevProxyConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_dev_port(),
            target: default_dev_target(),
        }
    }
}

/// Top-level `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayFileConfig {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dev_proxy: DevProxyConfig,
}
