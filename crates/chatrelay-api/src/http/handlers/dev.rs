//! Development rewrite proxy endpoint.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri};

use chatrelay_core::proxy::handler::ProxyHandler;

use crate::http::response::{ProxyReply, to_proxy_request};
use crate::state::DevProxyState;

/// ANY * (fallback) - Strip `/api` and forward to the dev target; other paths 404.
pub async fn forward(
    State(state): State<DevProxyState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ProxyReply {
    let request = to_proxy_request(&method, &uri, &headers, body);
    ProxyReply(state.proxy.handle(request).await)
}
