//! ProxyHandler trait definition.

use chatrelay_types::proxy::{ProxyRequest, ProxyResponse};

/// A server-side request handler the passthrough can delegate to.
///
/// Handlers always produce a response; failures are expressed as error
/// statuses rather than `Err` so the passthrough can return them verbatim.
///
/// Implementations live in chatrelay-infra (e.g., `UpstreamForwarder`).
pub trait ProxyHandler: Send + Sync {
    /// Short name for logs (e.g., "upstream-forwarder").
    fn name(&self) -> &str;

    /// Handle one request.
    fn handle(
        &self,
        request: ProxyRequest,
    ) -> impl std::future::Future<Output = ProxyResponse> + Send;
}
