//! Snapshot comparison handlers.
//!
//! The snapshot database holds periodic per-vehicle captures. Comparing
//! two capture timestamps pairs the rows by vehicle code; vehicles present
//! on only one side are reported one-sided rather than dropped.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};

use domain::models::{
    pair_captures, SnapshotCapture, SnapshotCompareQuery, SnapshotComparison,
};
use persistence::repositories::SnapshotRepository;

use crate::app::AppState;
use crate::error::ApiError;

const TIMESTAMP_DISCOVERY_LIMIT: i64 = 50;

/// GET /api/v1/snapshots/timestamps
pub async fn list_timestamps(
    State(state): State<AppState>,
) -> Result<Json<Vec<DateTime<Utc>>>, ApiError> {
    let repository = SnapshotRepository::new(state.databases.snapshot.clone());
    let timestamps = repository
        .capture_timestamps(TIMESTAMP_DISCOVERY_LIMIT)
        .await?;
    Ok(Json(timestamps))
}

/// GET /api/v1/snapshots/compare
pub async fn compare(
    State(state): State<AppState>,
    Query(query): Query<SnapshotCompareQuery>,
) -> Result<Json<Vec<SnapshotComparison>>, ApiError> {
    if query.before >= query.after {
        return Err(ApiError::Validation(
            "before must be earlier than after".to_string(),
        ));
    }

    let repository = SnapshotRepository::new(state.databases.snapshot.clone());
    let (before_rows, after_rows) = tokio::try_join!(
        repository.captures_at(query.before, query.customer_id),
        repository.captures_at(query.after, query.customer_id),
    )?;

    let before: Vec<SnapshotCapture> = before_rows.into_iter().map(Into::into).collect();
    let after: Vec<SnapshotCapture> = after_rows.into_iter().map(Into::into).collect();

    if before.is_empty() && after.is_empty() {
        return Err(ApiError::NotFound(
            "No captures exist at either timestamp".to_string(),
        ));
    }

    Ok(Json(pair_captures(before, after)))
}
