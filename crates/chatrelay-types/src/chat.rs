//! Chat exchange payloads.
//!
//! One user turn is a `ChatRequest` sent to the webhook and a `ChatReply`
//! received back. Neither is persisted.

use serde::{Deserialize, Serialize};

/// Outgoing half of a chat exchange: `{"message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Incoming half of a chat exchange: `{"reply": "..."}`.
///
/// `reply` must be a JSON string. Extra fields in the webhook response are
/// ignored; a missing or non-string `reply` fails deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}
