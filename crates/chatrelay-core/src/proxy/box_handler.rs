//! BoxProxyHandler -- object-safe dynamic dispatch wrapper for ProxyHandler.
//!
//! 1. Define an object-safe `ProxyHandlerDyn` trait with a boxed future
//! 2. Blanket-impl `ProxyHandlerDyn` for all `T: ProxyHandler`
//! 3. `BoxProxyHandler` wraps `Box<dyn ProxyHandlerDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use chatrelay_types::proxy::{ProxyRequest, ProxyResponse};

use super::handler::ProxyHandler;

/// Object-safe version of [`ProxyHandler`] with a boxed future.
pub trait ProxyHandlerDyn: Send + Sync {
    fn name(&self) -> &str;

    fn handle_boxed(
        &self,
        request: ProxyRequest,
    ) -> Pin<Box<dyn Future<Output = ProxyResponse> + Send + '_>>;
}

impl<T: ProxyHandler> ProxyHandlerDyn for T {
    fn name(&self) -> &str {
        ProxyHandler::name(self)
    }

    fn handle_boxed(
        &self,
        request: ProxyRequest,
    ) -> Pin<Box<dyn Future<Output = ProxyResponse> + Send + '_>> {
        Box::pin(self.handle(request))
    }
}

/// Type-erased proxy handler, chosen at runtime by a loader.
pub struct BoxProxyHandler {
    inner: Box<dyn ProxyHandlerDyn + Send + Sync>,
}

impl BoxProxyHandler {
    /// Wrap a concrete `ProxyHandler` in a type-erased box.
    pub fn new<T: ProxyHandler + 'static>(handler: T) -> Self {
        Self {
            inner: Box::new(handler),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Delegate the request to the wrapped handler.
    pub async fn handle(&self, request: ProxyRequest) -> ProxyResponse {
        self.inner.handle_boxed(request).await
    }
}

impl std::fmt::Debug for BoxProxyHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxProxyHandler")
            .field("name", &self.name())
            .finish()
    }
}
