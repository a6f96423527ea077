//! Rule-based helpdesk chatbot handler.

use axum::Json;
use validator::Validate;

use domain::models::{ChatReply, ChatRequest};
use domain::services::chatbot;

use crate::error::ApiError;

/// POST /api/v1/chatbot
///
/// Stateless: each message is matched against the rule set on its own,
/// no conversation history is kept.
pub async fn chat(Json(request): Json<ChatRequest>) -> Result<Json<ChatReply>, ApiError> {
    request.validate()?;
    Ok(Json(chatbot::reply(&request.message)))
}
