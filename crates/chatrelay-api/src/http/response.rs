//! Conversions between axum requests/responses and proxy values.

use axum::body::Bytes;
use axum::http::header::{HeaderName, HeaderValue};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use chatrelay_types::proxy::{ProxyRequest, ProxyResponse};

/// Build a [`ProxyRequest`] from the parts axum extracted.
pub fn to_proxy_request(method: &Method, uri: &Uri, headers: &HeaderMap, body: Bytes) -> ProxyRequest {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    ProxyRequest {
        method: method.as_str().to_string(),
        path,
        headers,
        body: body.to_vec(),
    }
}

/// Axum response wrapper for a handler's [`ProxyResponse`].
pub struct ProxyReply(pub ProxyResponse);

impl IntoResponse for ProxyReply {
    fn into_response(self) -> Response {
        let ProxyResponse {
            status,
            headers,
            body,
        } = self.0;

        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);

        let mut header_map = HeaderMap::new();
        for (name, value) in headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                header_map.append(name, value);
            }
        }

        (status, header_map, body).into_response()
    }
}
