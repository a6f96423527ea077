//! Health check endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use sqlx::PgPool;

use crate::app::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub databases: DatabasesHealth,
}

/// Per-database connectivity status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabasesHealth {
    pub fleet: DatabaseHealth,
    pub helpdesk: DatabaseHealth,
    pub snapshot: DatabaseHealth,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseHealth {
    pub connected: bool,
    pub latency_ms: Option<u64>,
}

/// Simple status response for liveness/readiness probes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

async fn ping(pool: &PgPool) -> DatabaseHealth {
    let start = std::time::Instant::now();
    let connected = sqlx::query("SELECT 1").execute(pool).await.is_ok();
    DatabaseHealth {
        connected,
        latency_ms: connected.then(|| start.elapsed().as_millis() as u64),
    }
}

/// Full health check endpoint covering all three databases.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let fleet = ping(&state.databases.fleet).await;
    let helpdesk = ping(&state.databases.helpdesk).await;
    let snapshot = ping(&state.databases.snapshot).await;

    let status = if fleet.connected && helpdesk.connected && snapshot.connected {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        databases: DatabasesHealth {
            fleet,
            helpdesk,
            snapshot,
        },
    })
}

/// Liveness probe: the process is up and serving requests.
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "alive".to_string(),
    })
}

/// Readiness probe: the helpdesk database must answer before traffic is
/// routed here. The fleet and snapshot databases are external systems and
/// degrade individual endpoints rather than the whole service.
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, StatusCode> {
    if sqlx::query("SELECT 1")
        .execute(&state.databases.helpdesk)
        .await
        .is_ok()
    {
        Ok(Json(StatusResponse {
            status: "ready".to_string(),
        }))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}
