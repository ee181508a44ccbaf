//! UpstreamForwarder -- the production implementation behind the proxy
//! passthrough.
//!
//! Browsers post `{"message": ...}` to the passthrough on the app's own
//! origin; this handler posts the same body to the webhook configured
//! server-side and hands the webhook's answer back.

use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use serde_json::json;

use chatrelay_core::proxy::box_handler::BoxProxyHandler;
use chatrelay_core::proxy::handler::ProxyHandler;
use chatrelay_core::proxy::passthrough::HandlerLoader;
use chatrelay_types::error::ProxyLoadError;
use chatrelay_types::proxy::{ProxyRequest, ProxyResponse};

use super::{build_client, parse_target, relay_response, upstream_failure};

/// Environment variable naming the upstream webhook.
pub const UPSTREAM_URL_ENV: &str = "N8N_WEBHOOK_URL";

/// Posts request bodies to a fixed webhook URL.
pub struct UpstreamForwarder {
    client: reqwest::Client,
    target: Url,
}

impl UpstreamForwarder {
    pub fn new(client: reqwest::Client, target: Url) -> Self {
        Self { client, target }
    }

    pub fn target(&self) -> &Url {
        &self.target
    }
}

impl ProxyHandler for UpstreamForwarder {
    fn name(&self) -> &str {
        "upstream-forwarder"
    }

    async fn handle(&self, request: ProxyRequest) -> ProxyResponse {
        if !request.method.eq_ignore_ascii_case("POST") {
            return ProxyResponse::json(405, &json!({ "error": "Method not allowed" }));
        }

        match self
            .client
            .post(self.target.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(request.body)
            .send()
            .await
        {
            Ok(response) => relay_response(response).await,
            Err(e) => upstream_failure(&e),
        }
    }
}

/// Loads an [`UpstreamForwarder`] from the configured upstream URL.
pub struct UpstreamForwarderLoader {
    upstream_url: Option<String>,
}

impl UpstreamForwarderLoader {
    pub fn new(upstream_url: Option<String>) -> Self {
        Self { upstream_url }
    }
}

impl HandlerLoader for UpstreamForwarderLoader {
    fn load(&self) -> Result<BoxProxyHandler, ProxyLoadError> {
        let raw = self
            .upstream_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ProxyLoadError::MissingTarget(UPSTREAM_URL_ENV.to_string()))?;

        let target = parse_target(raw)?;
        let client = build_client()?;
        tracing::debug!(target = %target, "upstream forwarder ready");
        Ok(BoxProxyHandler::new(UpstreamForwarder::new(client, target)))
    }
}
