//! Ticket comment domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A comment attached to a ticket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub ticket_id: i64,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Request payload for adding a comment.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 100, message = "Author must be between 1 and 100 characters"))]
    pub author: String,

    #[validate(length(min = 1, max = 5000, message = "Body must be between 1 and 5000 characters"))]
    pub body: String,
}
