//! Proxy passthrough endpoint.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri};

use crate::http::response::{ProxyReply, to_proxy_request};
use crate::state::AppState;

/// ANY /api/proxyWebhook - Hand the request to the passthrough.
///
/// The request is delegated verbatim; the response is either the loaded
/// handler's answer or the fixed 500 degraded response.
pub async fn proxy_webhook(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ProxyReply {
    let request = to_proxy_request(&method, &uri, &headers, body);
    ProxyReply(state.passthrough.handle(request).await)
}
