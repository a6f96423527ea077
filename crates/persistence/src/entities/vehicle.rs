//! Fleet database row mappings.
//!
//! These rows come from the external FleetIQ schema, which this service
//! reads but never writes.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Composite row produced by the vehicle info batch query: master data
/// joined with customer/site names and the newest telemetry and
/// outbound-message timestamps.
#[derive(Debug, Clone, FromRow)]
pub struct VehicleInfoRow {
    pub vehicle_code: i64,
    pub external_code: String,
    pub hire_number: Option<String>,
    pub serial_number: Option<String>,
    pub firmware_version: Option<String>,
    pub screen_version: Option<String>,
    pub expansion_version: Option<String>,
    pub department: Option<String>,
    pub customer_name: Option<String>,
    pub site_name: Option<String>,
    pub last_connection: Option<DateTime<Utc>>,
    pub impact_base: Option<f64>,
    pub impact_multiplier: Option<f64>,
    pub impact_lockout: Option<i32>,
    pub seat_idle_seconds: Option<i32>,
    pub last_telemetry: Option<DateTime<Utc>>,
    pub last_dlist_message: Option<DateTime<Utc>>,
    pub last_preop_message: Option<DateTime<Utc>>,
}

/// One row of the grouped master-code / blacklist queries.
#[derive(Debug, Clone, FromRow)]
pub struct VehicleNameRow {
    pub vehicle_code: i64,
    pub display_name: String,
}

/// One card-swipe row within the trailing window.
#[derive(Debug, Clone, FromRow)]
pub struct SwipeRow {
    pub vehicle_code: i64,
    pub card_number: String,
    /// Null when the card did not match a driver under the vehicle's
    /// customer.
    pub driver_name: Option<String>,
    pub swiped_at: DateTime<Utc>,
}

/// Customer lookup row.
#[derive(Debug, Clone, FromRow)]
pub struct CustomerRow {
    pub id: i64,
    pub name: String,
}

impl From<CustomerRow> for domain::models::Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

/// Site lookup row.
#[derive(Debug, Clone, FromRow)]
pub struct SiteRow {
    pub id: i64,
    pub customer_id: i64,
    pub name: String,
}

impl From<SiteRow> for domain::models::Site {
    fn from(row: SiteRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            name: row.name,
        }
    }
}

impl From<SwipeRow> for domain::models::SwipeEvent {
    fn from(row: SwipeRow) -> Self {
        Self {
            card_number: row.card_number,
            driver_name: row.driver_name.unwrap_or_else(|| "No Driver".to_string()),
            swiped_at: row.swiped_at,
        }
    }
}
