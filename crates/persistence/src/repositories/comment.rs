//! Comment repository for database operations.

use chrono::Utc;
use sqlx::PgPool;

use crate::entities::CommentEntity;

/// Repository for ticket comments.
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Creates a new CommentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a comment on a ticket and return the stored row.
    pub async fn create(
        &self,
        ticket_id: i64,
        author: &str,
        body: &str,
    ) -> Result<CommentEntity, sqlx::Error> {
        sqlx::query_as::<_, CommentEntity>(
            r#"
            INSERT INTO comments (ticket_id, author, body, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, ticket_id, author, body, created_at
            "#,
        )
        .bind(ticket_id)
        .bind(author)
        .bind(body)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    /// All comments on a ticket, oldest first.
    pub async fn list_for_ticket(&self, ticket_id: i64) -> Result<Vec<CommentEntity>, sqlx::Error> {
        sqlx::query_as::<_, CommentEntity>(
            r#"
            SELECT id, ticket_id, author, body, created_at
            FROM comments
            WHERE ticket_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Delete one comment scoped to its ticket. Returns rows removed.
    pub async fn delete(&self, ticket_id: i64, comment_id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM comments WHERE id = $1 AND ticket_id = $2
            "#,
        )
        .bind(comment_id)
        .bind(ticket_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
