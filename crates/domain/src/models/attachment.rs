//! File attachment domain model.
//!
//! Attachment bytes live in an object-storage collaborator; only the
//! metadata row is owned by the helpdesk database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Metadata for a file attached to a ticket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: i64,
    pub ticket_id: i64,
    pub file_name: String,
    pub content_type: String,
    /// Key of the blob in object storage.
    pub blob_key: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}

/// Request payload for registering an attachment.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttachmentRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "File name must be between 1 and 255 characters"
    ))]
    pub file_name: String,

    #[validate(length(min = 1, max = 100, message = "Content type is required"))]
    pub content_type: String,

    /// Base64-encoded file content is accepted for small uploads; larger
    /// files go directly to the storage collaborator.
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_attachment_validation() {
        let request = CreateAttachmentRequest {
            file_name: "impact-report.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            content: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_attachment_rejects_empty_name() {
        let request = CreateAttachmentRequest {
            file_name: String::new(),
            content_type: "application/pdf".to_string(),
            content: None,
        };
        assert!(request.validate().is_err());
    }
}
