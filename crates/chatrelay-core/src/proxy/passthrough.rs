//! Load-once proxy passthrough.
//!
//! On first use the passthrough asks its [`HandlerLoader`] for the
//! implementation handler and memoizes the outcome for the rest of the
//! process lifetime:
//!
//! - [`HandlerState::Loaded`]: every request is delegated unmodified.
//! - [`HandlerState::Unavailable`]: every request gets HTTP 500 with
//!   `{"error": "Proxy handler load failed", "detail": "..."}`.
//!
//! There is no transition between the two states and the load is never
//! retried.

use std::sync::OnceLock;

use chatrelay_types::error::ProxyLoadError;
use chatrelay_types::proxy::{ProxyRequest, ProxyResponse};
use serde_json::json;

use super::box_handler::BoxProxyHandler;

/// `error` field of the degraded response.
pub const LOAD_FAILED_MESSAGE: &str = "Proxy handler load failed";

/// Resolves the implementation handler the passthrough delegates to.
pub trait HandlerLoader: Send + Sync {
    fn load(&self) -> Result<BoxProxyHandler, ProxyLoadError>;
}

impl<F> HandlerLoader for F
where
    F: Fn() -> Result<BoxProxyHandler, ProxyLoadError> + Send + Sync,
{
    fn load(&self) -> Result<BoxProxyHandler, ProxyLoadError> {
        self()
    }
}

/// Outcome of the one-time handler load.
#[derive(Debug)]
pub enum HandlerState {
    Loaded(BoxProxyHandler),
    Unavailable(ProxyLoadError),
}

/// Server-side passthrough that delegates to a lazily loaded handler.
pub struct Passthrough {
    loader: Box<dyn HandlerLoader>,
    state: OnceLock<HandlerState>,
}

impl Passthrough {
    /// Create a passthrough without loading the handler yet.
    pub fn new<L: HandlerLoader + 'static>(loader: L) -> Self {
        Self {
            loader: Box::new(loader),
            state: OnceLock::new(),
        }
    }

    /// Create a passthrough and run the load immediately.
    pub fn initialize<L: HandlerLoader + 'static>(loader: L) -> Self {
        let passthrough = Self::new(loader);
        passthrough.state();
        passthrough
    }

    /// The memoized load outcome, loading on first access.
    pub fn state(&self) -> &HandlerState {
        self.state.get_or_init(|| match self.loader.load() {
            Ok(handler) => {
                tracing::info!(handler = handler.name(), "proxy handler loaded");
                HandlerState::Loaded(handler)
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load proxy handler");
                HandlerState::Unavailable(err)
            }
        })
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state(), HandlerState::Loaded(_))
    }

    /// Handle one request: delegate, or answer with the degraded response.
    pub async fn handle(&self, request: ProxyRequest) -> ProxyResponse {
        match self.state() {
            HandlerState::Loaded(handler) => handler.handle(request).await,
            HandlerState::Unavailable(err) => {
                tracing::error!(error = %err, "proxy handler unavailable");
                degraded_response(err)
            }
        }
    }
}

/// The fixed 500 response returned while the handler is unavailable.
pub fn degraded_response(err: &ProxyLoadError) -> ProxyResponse {
    ProxyResponse::json(
        500,
        &json!({
            "error": LOAD_FAILED_MESSAGE,
            "detail": err.to_string(),
        }),
    )
}
