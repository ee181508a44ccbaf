//! ChatClient trait definition.

use chatrelay_types::error::RelayError;

/// Sends one chat message and returns the webhook's reply.
///
/// Implementations live in chatrelay-infra (e.g., `WebhookClient`).
pub trait ChatClient: Send + Sync {
    /// Send `message` and wait for the reply string.
    fn send_message(
        &self,
        message: &str,
    ) -> impl std::future::Future<Output = Result<String, RelayError>> + Send;
}
