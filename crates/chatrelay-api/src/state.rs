//! Application state shared by the HTTP handlers.
//!
//! The proxy passthrough is built once at startup and shared through
//! `Arc`, so the implementation handler is loaded once per process.

use std::sync::Arc;

use chatrelay_core::proxy::passthrough::Passthrough;
use chatrelay_infra::forward::{DevRewriteProxy, UpstreamForwarderLoader};
use chatrelay_types::config::{DevProxyConfig, ServerConfig};
use chatrelay_types::error::ProxyLoadError;

/// State for `chatrelay serve`.
#[derive(Clone)]
pub struct AppState {
    pub passthrough: Arc<Passthrough>,
    pub web_dir: Option<String>,
}

impl AppState {
    /// Load the proxy handler and wire the state.
    ///
    /// A failed load is not an error here: the passthrough keeps serving
    /// its degraded response.
    pub fn init(server: &ServerConfig) -> Self {
        let loader = UpstreamForwarderLoader::new(server.upstream_url.clone());
        Self::with_passthrough(Passthrough::initialize(loader), server.web_dir.clone())
    }

    pub fn with_passthrough(passthrough: Passthrough, web_dir: Option<String>) -> Self {
        Self {
            passthrough: Arc::new(passthrough),
            web_dir,
        }
    }
}

/// State for `chatrelay dev-proxy`.
#[derive(Clone)]
pub struct DevProxyState {
    pub proxy: Arc<DevRewriteProxy>,
}

impl DevProxyState {
    pub fn init(dev: &DevProxyConfig) -> Result<Self, ProxyLoadError> {
        Ok(Self {
            proxy: Arc::new(DevRewriteProxy::new(&dev.target)?),
        })
    }
}
