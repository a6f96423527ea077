//! Attachment metadata repository.
//!
//! Only the metadata rows live here; the bytes belong to the object
//! storage collaborator.

use chrono::Utc;
use sqlx::PgPool;

use crate::entities::AttachmentEntity;

/// Repository for attachment metadata rows.
#[derive(Clone)]
pub struct AttachmentRepository {
    pool: PgPool,
}

impl AttachmentRepository {
    /// Creates a new AttachmentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an attachment metadata row and return it.
    pub async fn create(
        &self,
        ticket_id: i64,
        file_name: &str,
        content_type: &str,
        blob_key: &str,
        size_bytes: i64,
    ) -> Result<AttachmentEntity, sqlx::Error> {
        sqlx::query_as::<_, AttachmentEntity>(
            r#"
            INSERT INTO attachments (ticket_id, file_name, content_type, blob_key,
                                     size_bytes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, ticket_id, file_name, content_type, blob_key,
                      size_bytes, created_at
            "#,
        )
        .bind(ticket_id)
        .bind(file_name)
        .bind(content_type)
        .bind(blob_key)
        .bind(size_bytes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    /// Find an attachment by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<AttachmentEntity>, sqlx::Error> {
        sqlx::query_as::<_, AttachmentEntity>(
            r#"
            SELECT id, ticket_id, file_name, content_type, blob_key,
                   size_bytes, created_at
            FROM attachments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// All attachments on a ticket, oldest first.
    pub async fn list_for_ticket(
        &self,
        ticket_id: i64,
    ) -> Result<Vec<AttachmentEntity>, sqlx::Error> {
        sqlx::query_as::<_, AttachmentEntity>(
            r#"
            SELECT id, ticket_id, file_name, content_type, blob_key,
                   size_bytes, created_at
            FROM attachments
            WHERE ticket_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Delete an attachment metadata row. Returns rows removed (0 or 1).
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM attachments WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
