//! Attachment entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the attachments table.
#[derive(Debug, Clone, FromRow)]
pub struct AttachmentEntity {
    pub id: i64,
    pub ticket_id: i64,
    pub file_name: String,
    pub content_type: String,
    pub blob_key: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}

impl From<AttachmentEntity> for domain::models::Attachment {
    fn from(entity: AttachmentEntity) -> Self {
        Self {
            id: entity.id,
            ticket_id: entity.ticket_id,
            file_name: entity.file_name,
            content_type: entity.content_type,
            blob_key: entity.blob_key,
            size_bytes: entity.size_bytes,
            created_at: entity.created_at,
        }
    }
}
