//! Shared domain types for chatrelay.
//!
//! This crate contains the types passed between the webhook client, the
//! proxy passthrough and the HTTP layer: the chat exchange payloads, the
//! transport-neutral proxy request/response, configuration and error enums.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod proxy;
