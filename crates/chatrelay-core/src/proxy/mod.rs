//! Proxy handler abstractions for chatrelay.
//!
//! - `ProxyHandler`: RPITIT trait for concrete request handlers
//! - `BoxProxyHandler`: object-safe wrapper for dynamic dispatch
//! - `Passthrough`: loads its handler once and delegates to it, or
//!   degrades to a fixed error response when the load failed

pub mod box_handler;
pub mod handler;
pub mod passthrough;
