//! Infrastructure layer for chatrelay.
//!
//! Contains implementations of the traits defined in `chatrelay-core`:
//! the reqwest-backed webhook client, the upstream forwarder the proxy
//! passthrough loads in production, the development rewrite proxy, and
//! configuration loading from `config.toml` and the environment.

pub mod config;
pub mod forward;
pub mod webhook;
