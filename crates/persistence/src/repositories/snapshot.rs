//! Snapshot repository over the reporting database.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::entities::SnapshotRow;

/// Repository for vehicle_info snapshot captures.
#[derive(Clone)]
pub struct SnapshotRepository {
    pool: PgPool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All capture rows taken at the given timestamp, optionally
    /// restricted to one customer's vehicles.
    pub async fn captures_at(
        &self,
        captured_at: DateTime<Utc>,
        customer_id: Option<i64>,
    ) -> Result<Vec<SnapshotRow>, sqlx::Error> {
        sqlx::query_as::<_, SnapshotRow>(
            r#"
            SELECT vehicle_code, captured_at, hours_run, impact_count,
                   preop_failures, firmware_version
            FROM vehicle_info
            WHERE captured_at = $1
              AND ($2::BIGINT IS NULL OR customer_id = $2)
            ORDER BY vehicle_code ASC
            "#,
        )
        .bind(captured_at)
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Distinct capture timestamps, newest first, for discovery.
    pub async fn capture_timestamps(
        &self,
        limit: i64,
    ) -> Result<Vec<DateTime<Utc>>, sqlx::Error> {
        let rows: Vec<(DateTime<Utc>,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT captured_at FROM vehicle_info
            ORDER BY captured_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(ts,)| ts).collect())
    }
}
