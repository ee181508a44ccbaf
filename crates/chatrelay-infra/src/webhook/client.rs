//! WebhookClient -- concrete [`ChatClient`] implementation over reqwest.
//!
//! Resolves the endpoint from [`ClientConfig`] on every call, posts
//! `{"message": ...}` and validates that the answer is `{"reply": string}`.
//! No retries and no timeout beyond reqwest's defaults.

use reqwest::Url;
use reqwest::header::CONTENT_TYPE;

use chatrelay_core::client::ChatClient;
use chatrelay_core::endpoint::{is_absolute, resolve_endpoint};
use chatrelay_types::chat::ChatRequest;
use chatrelay_types::config::ClientConfig;
use chatrelay_types::error::RelayError;

/// HTTP client for the chat webhook (or the proxy in front of it).
pub struct WebhookClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl WebhookClient {
    /// Create a client with a default reqwest client.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client sharing an existing reqwest client.
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve the endpoint and turn it into an absolute URL.
    pub fn endpoint_url(&self) -> Result<Url, RelayError> {
        let endpoint = resolve_endpoint(&self.config)?;
        absolute_url(&endpoint, &self.config.app_origin)
    }
}

/// Absolutize `endpoint`, joining relative paths onto `origin`.
///
/// Anything that cannot become an http(s) URL is a configuration error.
pub fn absolute_url(endpoint: &str, origin: &str) -> Result<Url, RelayError> {
    let url = if is_absolute(endpoint) {
        Url::parse(endpoint)
    } else {
        Url::parse(origin).and_then(|base| base.join(endpoint))
    }
    .map_err(|e| {
        RelayError::Configuration(format!(
            "webhook endpoint '{endpoint}' is not a usable URL (origin '{origin}'): {e}"
        ))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RelayError::Configuration(format!(
            "webhook endpoint '{url}' uses unsupported scheme '{other}'"
        ))),
    }
}

/// Validate a success body as `{ reply: string }`.
///
/// The body must be a JSON object; arrays and scalars are rejected even
/// when their first element is a string.
pub fn parse_reply(body: &[u8]) -> Result<String, RelayError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| RelayError::Validation(format!("expected {{ reply: string }} ({e})")))?;

    let serde_json::Value::Object(fields) = value else {
        return Err(RelayError::Validation(
            "expected { reply: string }, got a non-object body".to_string(),
        ));
    };

    match fields.get("reply").and_then(serde_json::Value::as_str) {
        Some(reply) => Ok(reply.to_string()),
        None => Err(RelayError::Validation(
            "expected { reply: string }, `reply` is missing or not a string".to_string(),
        )),
    }
}

impl ChatClient for WebhookClient {
    async fn send_message(&self, message: &str) -> Result<String, RelayError> {
        let url = self.endpoint_url()?;
        tracing::debug!(endpoint = %url, mode = %self.config.mode, "sending message to webhook");

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&ChatRequest::new(message))
            .send()
            .await
            .map_err(|e| RelayError::Transport {
                status: None,
                detail: format!("request to {url} failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = if text.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                text
            };
            tracing::warn!(status = status.as_u16(), "webhook returned error status");
            return Err(RelayError::Transport {
                status: Some(status.as_u16()),
                detail,
            });
        }

        let body = response.bytes().await.map_err(|e| RelayError::Transport {
            status: Some(status.as_u16()),
            detail: format!("failed to read response body: {e}"),
        })?;

        parse_reply(&body)
    }
}
