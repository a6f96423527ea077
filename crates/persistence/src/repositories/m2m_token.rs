//! Machine-to-machine token repository.
//!
//! The table holds a single row; refreshes upsert it. Last write wins at
//! the database layer, in-process refreshes are serialized by the token
//! service.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::entities::M2mTokenEntity;

/// Repository for the single persisted M2M token row.
#[derive(Clone)]
pub struct M2mTokenRepository {
    pool: PgPool,
}

impl M2mTokenRepository {
    /// Creates a new M2mTokenRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the stored token, if any.
    pub async fn get(&self) -> Result<Option<M2mTokenEntity>, sqlx::Error> {
        sqlx::query_as::<_, M2mTokenEntity>(
            r#"
            SELECT access_token, expires_at FROM m2m_tokens
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
    }

    /// Store a freshly issued token, replacing any previous one.
    pub async fn upsert(
        &self,
        access_token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO m2m_tokens (id, access_token, expires_at, refreshed_at)
            VALUES (1, $1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                access_token = EXCLUDED.access_token,
                expires_at = EXCLUDED.expires_at,
                refreshed_at = EXCLUDED.refreshed_at
            "#,
        )
        .bind(access_token)
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
