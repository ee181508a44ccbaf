//! Relay logic for chatrelay.
//!
//! This crate defines the "ports" the infrastructure layer implements
//! (`ChatClient`, `ProxyHandler`, `HandlerLoader`) and the pure pieces of
//! the relay: endpoint selection, dev-proxy path rewriting and the
//! load-once proxy passthrough. It depends only on `chatrelay-types` --
//! never on an HTTP client or server crate.

pub mod client;
pub mod endpoint;
pub mod proxy;
pub mod rewrite;
