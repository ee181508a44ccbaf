//! Server-side forwarding handlers.
//!
//! - `UpstreamForwarder`: the production implementation handler the proxy
//!   passthrough loads. Posts the body to the configured webhook.
//! - `DevRewriteProxy`: development proxy that strips `/api` and forwards
//!   to a local webhook host.
//!
//! Both relay the upstream status, headers and body unchanged and answer
//! 502 when the upstream cannot be reached.

pub mod dev;
pub mod upstream;

pub use dev::DevRewriteProxy;
pub use upstream::{UPSTREAM_URL_ENV, UpstreamForwarder, UpstreamForwarderLoader};

use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::json;

use chatrelay_types::error::ProxyLoadError;
use chatrelay_types::proxy::ProxyResponse;

/// Headers that describe a single connection and must not be forwarded.
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Whether a header should be dropped when crossing the proxy.
///
/// `host` is rewritten to the target's origin by reqwest and
/// `content-length` is recomputed from the forwarded body.
pub(crate) fn is_unforwardable(name: &str) -> bool {
    name.eq_ignore_ascii_case("host")
        || name.eq_ignore_ascii_case("content-length")
        || HOP_BY_HOP.iter().any(|h| name.eq_ignore_ascii_case(h))
}

/// Parse a forward target, accepting only absolute http(s) URLs.
pub fn parse_target(raw: &str) -> Result<Url, ProxyLoadError> {
    let url = Url::parse(raw.trim()).map_err(|e| ProxyLoadError::InvalidTarget {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ProxyLoadError::InvalidTarget {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(url)
}

/// Build the reqwest client shared by a forwarding handler.
pub(crate) fn build_client() -> Result<reqwest::Client, ProxyLoadError> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| ProxyLoadError::Client(e.to_string()))
}

/// Convert `(name, value)` pairs to a reqwest header map, skipping
/// unforwardable and malformed entries.
pub(crate) fn forward_headers(headers: &[(String, String)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        if is_unforwardable(name) {
            continue;
        }
        let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) else {
            tracing::debug!(header = %name, "skipping malformed header");
            continue;
        };
        map.append(name, value);
    }
    map
}

/// Read an upstream response into a [`ProxyResponse`].
pub(crate) async fn relay_response(response: reqwest::Response) -> ProxyResponse {
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter(|(name, _)| !is_unforwardable(name.as_str()))
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    match response.bytes().await {
        Ok(body) => ProxyResponse {
            status,
            headers,
            body: body.to_vec(),
        },
        Err(e) => upstream_failure(&e),
    }
}

/// 502 response for an upstream that could not be reached or read.
pub(crate) fn upstream_failure(err: &reqwest::Error) -> ProxyResponse {
    tracing::warn!(error = %err, "upstream webhook request failed");
    ProxyResponse::json(
        502,
        &json!({
            "error": "Upstream webhook request failed",
            "detail": err.to_string(),
        }),
    )
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;

    /// Serve `router` on an ephemeral port and return its origin.
    pub async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// An origin nothing is listening on.
    pub async fn dead_origin() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hop_by_hop_and_host_are_not_forwarded() {
        assert!(is_unforwardable("Host"));
        assert!(is_unforwardable("Connection"));
        assert!(is_unforwardable("transfer-encoding"));
        assert!(is_unforwardable("Content-Length"));
        assert!(!is_unforwardable("content-type"));
        assert!(!is_unforwardable("x-request-id"));
    }

    #[test]
    fn forward_headers_filters_and_keeps_order() {
        let headers = vec![
            ("host".to_string(), "localhost:5173".to_string()),
            ("content-type".to_string(), "application/json".to_string()),
            ("x-custom".to_string(), "a".to_string()),
            ("x-custom".to_string(), "b".to_string()),
            ("bad header".to_string(), "x".to_string()),
        ];
        let map = forward_headers(&headers);
        assert!(map.get("host").is_none());
        assert_eq!(map.get("content-type").unwrap(), "application/json");
        let custom: Vec<_> = map.get_all("x-custom").iter().collect();
        assert_eq!(custom.len(), 2);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn parse_target_accepts_http_urls_only() {
        assert!(parse_target("https://n8n.example.com/webhook/chat").is_ok());
        assert!(parse_target(" http://localhost:5678 ").is_ok());
        assert!(matches!(
            parse_target("localhost:5678/webhook"),
            Err(ProxyLoadError::InvalidTarget { .. })
        ));
        assert!(matches!(
            parse_target("/relative/path"),
            Err(ProxyLoadError::InvalidTarget { .. })
        ));
    }
}
