use thiserror::Error;

/// Errors from a single webhook call.
///
/// Each variant is scoped to the request that produced it; none is retried.
#[derive(Debug, Error)]
pub enum RelayError {
    /// No usable endpoint could be resolved. The network was never touched.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request could not complete (`status == None`) or the webhook
    /// answered with a non-success status.
    #[error("webhook error {}: {detail}", status_label(.status))]
    Transport { status: Option<u16>, detail: String },

    /// The webhook answered successfully but the body was not `{ reply: string }`.
    #[error("invalid response from webhook: {0}")]
    Validation(String),
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "(no response)".to_string(),
    }
}

impl RelayError {
    /// HTTP status carried by a `Transport` error, if the webhook answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            RelayError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

/// Why the proxy passthrough could not load its implementation handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProxyLoadError {
    #[error("no upstream webhook configured: set {0}")]
    MissingTarget(String),

    #[error("invalid upstream webhook URL '{url}': {reason}")]
    InvalidTarget { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Errors from reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid build mode: '{0}' (expected 'production' or 'development')")]
    InvalidMode(String),

    #[error("failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display_with_status() {
        let err = RelayError::Transport {
            status: Some(500),
            detail: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "webhook error 500: boom");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_transport_error_display_without_status() {
        let err = RelayError::Transport {
            status: None,
            detail: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "webhook error (no response): connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_proxy_load_error_display() {
        let err = ProxyLoadError::MissingTarget("N8N_WEBHOOK_URL".to_string());
        assert_eq!(
            err.to_string(),
            "no upstream webhook configured: set N8N_WEBHOOK_URL"
        );
    }
}
