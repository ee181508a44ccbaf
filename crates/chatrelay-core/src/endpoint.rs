//! Endpoint selection for the webhook client.
//!
//! Production builds talk to the proxy passthrough (a fixed local route
//! unless overridden); development builds talk to the webhook directly.

use chatrelay_types::config::{BuildMode, ClientConfig};
use chatrelay_types::error::RelayError;

/// Route the proxy passthrough is mounted on when no override is configured.
pub const DEFAULT_PROXY_PATH: &str = "/api/proxyWebhook";

/// Environment variable holding the direct webhook URL (development).
pub const WEBHOOK_URL_ENV: &str = "CHATRELAY_WEBHOOK_URL";

/// Environment variable overriding the proxy path (production).
pub const PROXY_URL_ENV: &str = "CHATRELAY_PROXY_URL";

/// Pick the endpoint for `config`.
///
/// - Production: `proxy_url` if set and non-blank, else [`DEFAULT_PROXY_PATH`].
/// - Development: `webhook_url`.
///
/// A blank result is a [`RelayError::Configuration`]; callers must not
/// touch the network in that case. The returned endpoint may be relative.
pub fn resolve_endpoint(config: &ClientConfig) -> Result<String, RelayError> {
    let resolved = match config.mode {
        BuildMode::Production => config
            .proxy_url
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PROXY_PATH),
        BuildMode::Development => config.webhook_url.as_deref().map(str::trim).unwrap_or(""),
    };

    if resolved.is_empty() {
        return Err(RelayError::Configuration(format!(
            "missing webhook URL: set {WEBHOOK_URL_ENV} (development) or {PROXY_URL_ENV} (production)"
        )));
    }

    Ok(resolved.to_string())
}

/// Whether an endpoint already names a scheme and host.
pub fn is_absolute(endpoint: &str) -> bool {
    let lower = endpoint.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
