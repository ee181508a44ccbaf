//! HTTP layer for chatrelay.
//!
//! Axum routers for the production passthrough (`serve`) and the
//! development rewrite proxy (`dev-proxy`), plus conversions between axum
//! types and the transport-neutral proxy types.

pub mod handlers;
pub mod response;
pub mod router;
