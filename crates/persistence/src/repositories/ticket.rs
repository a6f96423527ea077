//! Ticket repository for database operations.

use chrono::Utc;
use sqlx::PgPool;

use crate::entities::TicketEntity;

/// Repository for ticket-related database operations.
#[derive(Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    /// Creates a new TicketRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new ticket and return the stored row.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        title: &str,
        description: &str,
        priority: &str,
        requester: &str,
        assignee: Option<&str>,
        vehicle_code: Option<i64>,
    ) -> Result<TicketEntity, sqlx::Error> {
        let now = Utc::now();
        sqlx::query_as::<_, TicketEntity>(
            r#"
            INSERT INTO tickets (title, description, status, priority, requester,
                                 assignee, vehicle_code, created_at, updated_at)
            VALUES ($1, $2, 'open', $3, $4, $5, $6, $7, $7)
            RETURNING id, title, description, status, priority, requester,
                      assignee, vehicle_code, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(priority)
        .bind(requester)
        .bind(assignee)
        .bind(vehicle_code)
        .bind(now)
        .fetch_one(&self.pool)
        .await
    }

    /// Find a ticket by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<TicketEntity>, sqlx::Error> {
        sqlx::query_as::<_, TicketEntity>(
            r#"
            SELECT id, title, description, status, priority, requester,
                   assignee, vehicle_code, created_at, updated_at
            FROM tickets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Count tickets, optionally restricted to one status.
    pub async fn count(&self, status: Option<&str>) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM tickets
            WHERE ($1::TEXT IS NULL OR status = $1)
            "#,
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(count.0)
    }

    /// One page of tickets, newest first.
    pub async fn list(
        &self,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TicketEntity>, sqlx::Error> {
        sqlx::query_as::<_, TicketEntity>(
            r#"
            SELECT id, title, description, status, priority, requester,
                   assignee, vehicle_code, created_at, updated_at
            FROM tickets
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    /// Every ticket, oldest first, for CSV export.
    pub async fn list_all(&self) -> Result<Vec<TicketEntity>, sqlx::Error> {
        sqlx::query_as::<_, TicketEntity>(
            r#"
            SELECT id, title, description, status, priority, requester,
                   assignee, vehicle_code, created_at, updated_at
            FROM tickets
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Apply a partial update. Absent fields keep their stored values.
    pub async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        description: Option<&str>,
        status: Option<&str>,
        priority: Option<&str>,
        assignee: Option<&str>,
    ) -> Result<Option<TicketEntity>, sqlx::Error> {
        sqlx::query_as::<_, TicketEntity>(
            r#"
            UPDATE tickets
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                priority = COALESCE($5, priority),
                assignee = COALESCE($6, assignee),
                updated_at = $7
            WHERE id = $1
            RETURNING id, title, description, status, priority, requester,
                      assignee, vehicle_code, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(status)
        .bind(priority)
        .bind(assignee)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete a ticket. Returns the number of rows removed (0 or 1).
    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM tickets WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
