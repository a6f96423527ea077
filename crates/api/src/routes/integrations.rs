//! Outbound integration status handlers.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::m2m::M2mError;

/// Token status for outbound machine-to-machine calls. The token itself
/// is never exposed here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct M2mStatus {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// GET /api/v1/integrations/m2m
///
/// Ensures a valid token is held, refreshing it if needed, and reports
/// its expiry.
pub async fn m2m_status(State(state): State<AppState>) -> Result<Json<M2mStatus>, ApiError> {
    match state.m2m.current_token().await {
        Ok(token) => Ok(Json(M2mStatus {
            configured: true,
            expires_at: Some(token.expires_at),
        })),
        Err(M2mError::NotConfigured) => Ok(Json(M2mStatus {
            configured: false,
            expires_at: None,
        })),
        Err(M2mError::Database(e)) => Err(e.into()),
        Err(e) => Err(ApiError::ServiceUnavailable(format!(
            "M2M token refresh failed: {}",
            e
        ))),
    }
}
