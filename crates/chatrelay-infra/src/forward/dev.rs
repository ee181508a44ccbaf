//! DevRewriteProxy -- development stand-in for the dev server's `/api` proxy.
//!
//! `/api/webhook/chat` on the dev proxy becomes `/webhook/chat` on the
//! target (an n8n instance on localhost or a tunnel URL). Method, headers
//! and body pass through; `Host` is rewritten to the target.

use reqwest::{Method, Url};
use serde_json::json;

use chatrelay_core::proxy::handler::ProxyHandler;
use chatrelay_core::rewrite::rewrite_api_path;
use chatrelay_types::error::ProxyLoadError;
use chatrelay_types::proxy::{ProxyRequest, ProxyResponse};

use super::{build_client, forward_headers, parse_target, relay_response, upstream_failure};

pub struct DevRewriteProxy {
    client: reqwest::Client,
    target: Url,
}

impl DevRewriteProxy {
    /// Create a proxy forwarding to `target` (e.g. `http://localhost:5678`).
    pub fn new(target: &str) -> Result<Self, ProxyLoadError> {
        Ok(Self {
            client: build_client()?,
            target: parse_target(target)?,
        })
    }

    pub fn target(&self) -> &Url {
        &self.target
    }

    /// Target URL for an already rewritten path. A path on the target
    /// itself is kept as a prefix.
    fn upstream_url(&self, rewritten: &str) -> Result<Url, String> {
        let base = self.target.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{rewritten}")).map_err(|e| e.to_string())
    }
}

impl ProxyHandler for DevRewriteProxy {
    fn name(&self) -> &str {
        "dev-rewrite-proxy"
    }

    async fn handle(&self, request: ProxyRequest) -> ProxyResponse {
        let Some(rewritten) = rewrite_api_path(&request.path) else {
            return ProxyResponse::json(404, &json!({ "error": "Not found" }));
        };

        let url = match self.upstream_url(&rewritten) {
            Ok(url) => url,
            Err(reason) => {
                return ProxyResponse::json(
                    400,
                    &json!({ "error": "Invalid proxied path", "detail": reason }),
                );
            }
        };

        let Ok(method) = Method::from_bytes(request.method.as_bytes()) else {
            return ProxyResponse::json(405, &json!({ "error": "Method not allowed" }));
        };

        tracing::debug!(from = %request.path, to = %url, "dev proxy rewrite");

        match self
            .client
            .request(method, url)
            .headers(forward_headers(&request.headers))
            .body(request.body)
            .send()
            .await
        {
            Ok(response) => relay_response(response).await,
            Err(e) => upstream_failure(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::extract::RawQuery;
    use axum::http::{HeaderMap, Method as AxumMethod, StatusCode};
    use axum::routing::any;

    use super::super::test_support::{dead_origin, spawn_server};
    use super::*;

    #[test]
    fn new_rejects_bad_target() {
        assert!(matches!(
            DevRewriteProxy::new("ngrok-tunnel"),
            Err(ProxyLoadError::InvalidTarget { .. })
        ));
    }

    #[tokio::test]
    async fn strips_api_prefix_and_keeps_method_query_and_body() {
        let origin = spawn_server(Router::new().route(
            "/webhook/chat",
            any(
                |method: AxumMethod, RawQuery(query): RawQuery, headers: HeaderMap, body: String| async move {
                    let host = headers
                        .get("host")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    let custom = headers
                        .get("x-client")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    axum::Json(json!({
                        "method": method.as_str(),
                        "query": query,
                        "host": host,
                        "custom": custom,
                        "body": body,
                    }))
                },
            ),
        ))
        .await;

        let proxy = DevRewriteProxy::new(&origin).unwrap();
        let request = ProxyRequest {
            method: "PUT".to_string(),
            path: "/api/webhook/chat?debug=1".to_string(),
            headers: vec![
                ("host".to_string(), "localhost:5173".to_string()),
                ("x-client".to_string(), "ui".to_string()),
            ],
            body: b"payload".to_vec(),
        };

        let resp = proxy.handle(request).await;
        assert_eq!(resp.status, 200);
        let echoed = resp.json_body().unwrap();
        assert_eq!(echoed["method"], "PUT");
        assert_eq!(echoed["query"], "debug=1");
        assert_eq!(echoed["custom"], "ui");
        assert_eq!(echoed["body"], "payload");
        assert_eq!(echoed["host"], origin.trim_start_matches("http://"));
    }

    #[tokio::test]
    async fn target_path_is_kept_as_prefix() {
        let origin = spawn_server(Router::new().route(
            "/n8n/webhook/chat",
            any(|| async { (StatusCode::CREATED, "ok") }),
        ))
        .await;

        let proxy = DevRewriteProxy::new(&format!("{origin}/n8n/")).unwrap();
        let resp = proxy
            .handle(ProxyRequest::post_json("/api/webhook/chat", Vec::new()))
            .await;
        assert_eq!(resp.status, 201);
        assert_eq!(resp.body, b"ok");
    }

    #[tokio::test]
    async fn paths_outside_api_are_not_proxied() {
        let proxy = DevRewriteProxy::new("http://localhost:5678").unwrap();
        let resp = proxy
            .handle(ProxyRequest::post_json("/webhook/chat", Vec::new()))
            .await;
        assert_eq!(resp.status, 404);
    }

    #[tokio::test]
    async fn unreachable_target_is_bad_gateway() {
        let proxy = DevRewriteProxy::new(&dead_origin().await).unwrap();
        let resp = proxy
            .handle(ProxyRequest::post_json("/api/webhook/chat", Vec::new()))
            .await;
        assert_eq!(resp.status, 502);
    }
}
