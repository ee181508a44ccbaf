//! Webhook client: one JSON POST per chat message.

pub mod client;

pub use client::WebhookClient;
