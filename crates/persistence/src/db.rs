//! Database connection pool management.
//!
//! The backend talks to three independent PostgreSQL targets: the
//! read-only FleetIQ telemetry database, the helpdesk's own database, and
//! the snapshot/reporting database. One pool per target, opened at
//! startup and shared through the application state.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Connection settings for a single database target.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

/// The three pools used by the backend.
#[derive(Debug, Clone)]
pub struct Databases {
    /// FleetIQ telemetry (read-only).
    pub fleet: PgPool,
    /// Helpdesk-owned CRUD data.
    pub helpdesk: PgPool,
    /// Snapshot/reporting captures.
    pub snapshot: PgPool,
}

/// Creates a PostgreSQL connection pool with the given configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
}

/// Creates a pool without connecting eagerly. Used by tests and by
/// startup paths that must not block on an unreachable target.
pub fn create_pool_lazy(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect_lazy(&config.url)
}

impl Databases {
    /// Open all three pools, connecting eagerly.
    pub async fn connect(
        fleet: &DatabaseConfig,
        helpdesk: &DatabaseConfig,
        snapshot: &DatabaseConfig,
    ) -> Result<Self, sqlx::Error> {
        Ok(Self {
            fleet: create_pool(fleet).await?,
            helpdesk: create_pool(helpdesk).await?,
            snapshot: create_pool(snapshot).await?,
        })
    }

    /// Open all three pools lazily.
    pub fn connect_lazy(
        fleet: &DatabaseConfig,
        helpdesk: &DatabaseConfig,
        snapshot: &DatabaseConfig,
    ) -> Result<Self, sqlx::Error> {
        Ok(Self {
            fleet: create_pool_lazy(fleet)?,
            helpdesk: create_pool_lazy(helpdesk)?,
            snapshot: create_pool_lazy(snapshot)?,
        })
    }
}
