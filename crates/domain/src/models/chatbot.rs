//! Chatbot request/response shapes.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Incoming chat message.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 1000, message = "Message must be between 1 and 1000 characters"))]
    pub message: String,
}

/// Chatbot reply. `matched` is false when the fallback reply was used.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub reply: String,
    pub matched: bool,
}
