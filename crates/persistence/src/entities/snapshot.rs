//! Snapshot capture entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the time-partitioned vehicle_info captures.
#[derive(Debug, Clone, FromRow)]
pub struct SnapshotRow {
    pub vehicle_code: i64,
    pub captured_at: DateTime<Utc>,
    pub hours_run: Option<f64>,
    pub impact_count: Option<i32>,
    pub preop_failures: Option<i32>,
    pub firmware_version: Option<String>,
}

impl From<SnapshotRow> for domain::models::SnapshotCapture {
    fn from(row: SnapshotRow) -> Self {
        Self {
            vehicle_code: row.vehicle_code,
            captured_at: row.captured_at,
            hours_run: row.hours_run,
            impact_count: row.impact_count,
            preop_failures: row.preop_failures,
            firmware_version: row.firmware_version,
        }
    }
}
