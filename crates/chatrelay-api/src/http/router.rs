//! Axum router configuration with middleware.
//!
//! `serve` mounts the proxy passthrough on `/api/proxyWebhook`; the built
//! chat UI (configured via `CHATRELAY_WEB_DIR` or `[server] web_dir`) is
//! served from disk as the fallback when the directory exists.
//! `dev-proxy` forwards everything under `/api` to the dev target.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{any, get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use chatrelay_core::endpoint::DEFAULT_PROXY_PATH;

use crate::http::handlers;
use crate::state::{AppState, DevProxyState};

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the production router: passthrough, health check, optional UI.
pub fn build_router(state: AppState) -> Router {
    let web_dir = state.web_dir.clone();

    let mut router = Router::new()
        .route(DEFAULT_PROXY_PATH, any(handlers::proxy::proxy_webhook))
        .route("/health", get(handlers::health::health_check))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // API routes and /health take priority; unknown paths fall through
    // to index.html for client-side routing.
    if let Some(web_dir) = web_dir.filter(|d| std::path::Path::new(d).exists()) {
        let index_path = format!("{}/index.html", web_dir);
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "static UI serving enabled");
    }

    router
}

/// Build the development router: `/api` rewrite proxy and health check.
///
/// Everything except `/health` reaches the forward handler, which decides
/// from the path whether to proxy or answer 404.
pub fn build_dev_router(state: DevProxyState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .fallback(handlers::dev::forward)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::routing::post;
    use serde_json::json;

    use chatrelay_core::client::ChatClient;
    use chatrelay_core::proxy::box_handler::BoxProxyHandler;
    use chatrelay_core::proxy::passthrough::Passthrough;
    use chatrelay_infra::webhook::WebhookClient;
    use chatrelay_types::config::{BuildMode, ClientConfig, DevProxyConfig, ServerConfig};
    use chatrelay_types::error::ProxyLoadError;

    use super::*;

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn spawn_echo_webhook() -> String {
        spawn(Router::new().route(
            "/webhook/chat",
            post(|axum::Json(body): axum::Json<serde_json::Value>| async move {
                axum::Json(json!({ "reply": body["message"] }))
            }),
        ))
        .await
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let state = AppState::init(&ServerConfig::default());
        let origin = spawn(build_router(state)).await;

        let body: serde_json::Value = reqwest::get(format!("{origin}/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn missing_upstream_serves_degraded_response() {
        let state = AppState::init(&ServerConfig::default());
        assert!(!state.passthrough.is_loaded());
        let origin = spawn(build_router(state)).await;

        let client = reqwest::Client::new();
        for _ in 0..2 {
            let resp = client
                .post(format!("{origin}/api/proxyWebhook"))
                .json(&json!({ "message": "hi" }))
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 500);
            let body: serde_json::Value = resp.json().await.unwrap();
            assert_eq!(
                body,
                json!({
                    "error": "Proxy handler load failed",
                    "detail": "no upstream webhook configured: set N8N_WEBHOOK_URL",
                })
            );
        }
    }

    #[tokio::test]
    async fn degraded_detail_is_the_load_error_text() {
        let err = ProxyLoadError::Client("tls backend unavailable".to_string());
        let loader_err = err.clone();
        let state = AppState::with_passthrough(
            Passthrough::initialize(move || -> Result<BoxProxyHandler, ProxyLoadError> {
                Err(loader_err.clone())
            }),
            None,
        );
        let origin = spawn(build_router(state)).await;

        let resp = reqwest::Client::new()
            .post(format!("{origin}/api/proxyWebhook"))
            .body("{}")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 500);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["detail"], err.to_string());
    }

    #[tokio::test]
    async fn production_client_reaches_webhook_through_passthrough() {
        let webhook = spawn_echo_webhook().await;
        let state = AppState::init(&ServerConfig {
            upstream_url: Some(format!("{webhook}/webhook/chat")),
            ..ServerConfig::default()
        });
        assert!(state.passthrough.is_loaded());
        let origin = spawn(build_router(state)).await;

        let client = WebhookClient::new(ClientConfig {
            mode: BuildMode::Production,
            app_origin: origin,
            ..ClientConfig::default()
        });
        assert_eq!(
            client.send_message("two bedrooms near the park").await.unwrap(),
            "two bedrooms near the park"
        );
    }

    #[tokio::test]
    async fn development_client_reaches_webhook_through_dev_proxy() {
        let webhook = spawn_echo_webhook().await;
        let state = DevProxyState::init(&DevProxyConfig {
            target: webhook,
            ..DevProxyConfig::default()
        })
        .unwrap();
        let origin = spawn(build_dev_router(state)).await;

        let client = WebhookClient::new(ClientConfig {
            mode: BuildMode::Development,
            webhook_url: Some(format!("{origin}/api/webhook/chat")),
            ..ClientConfig::default()
        });
        assert_eq!(client.send_message("hello").await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn dev_router_proxies_every_api_form_and_rejects_lookalikes() {
        let webhook = spawn(Router::new().fallback(|uri: axum::http::Uri| async move {
            axum::Json(json!({ "path": uri.to_string() }))
        }))
        .await;
        let state = DevProxyState::init(&DevProxyConfig {
            target: webhook,
            ..DevProxyConfig::default()
        })
        .unwrap();
        let origin = spawn(build_dev_router(state)).await;
        let client = reqwest::Client::new();

        for (path, forwarded) in [
            ("/api", "/"),
            ("/api/", "/"),
            ("/api?x=1", "/?x=1"),
            ("/api/webhook/chat", "/webhook/chat"),
        ] {
            let resp = client
                .post(format!("{origin}{path}"))
                .body("{}")
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 200, "{path} should be proxied");
            let body: serde_json::Value = resp.json().await.unwrap();
            assert_eq!(body["path"], forwarded, "{path}");
        }

        for path in ["/apix", "/apix/webhook", "/webhook/chat"] {
            let resp = client
                .post(format!("{origin}{path}"))
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 404, "{path} must not be proxied");
            let body: serde_json::Value = resp.json().await.unwrap();
            assert_eq!(body["error"], "Not found");
        }

        let health = client.get(format!("{origin}/health")).send().await.unwrap();
        assert_eq!(health.status(), 200);
    }
}
