//! Vehicle domain model and fleet aggregation response shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller-supplied filter for vehicle resolution.
///
/// Exactly one of the three filters is used; when several are supplied
/// the external code wins, then the site, then the customer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFilter {
    /// Customer-facing external vehicle identifier.
    pub code: Option<String>,
    pub site_id: Option<i64>,
    pub customer_id: Option<i64>,
}

/// The single filter selected from a [`VehicleFilter`] after applying
/// precedence.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedFilter {
    ExternalCode(String),
    Site(i64),
    Customer(i64),
}

impl VehicleFilter {
    /// Apply filter precedence: external code, then site, then customer.
    ///
    /// Returns `None` when no filter was supplied at all.
    pub fn resolve(&self) -> Option<ResolvedFilter> {
        if let Some(code) = self.code.as_ref().filter(|c| !c.trim().is_empty()) {
            return Some(ResolvedFilter::ExternalCode(code.trim().to_string()));
        }
        if let Some(site_id) = self.site_id {
            return Some(ResolvedFilter::Site(site_id));
        }
        self.customer_id.map(ResolvedFilter::Customer)
    }
}

/// Online/offline status derived from telemetry recency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Online,
    Offline,
}

/// Point-in-time composite record for one vehicle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInfo {
    /// Internal vehicle code (fleet-telemetry primary key).
    pub vehicle_code: i64,
    /// Customer-facing identifier.
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
    pub status: VehicleStatus,
    /// Derived from the impact base and multiplier settings.
    pub impact_threshold: f64,
    pub impact_lockout: Option<i32>,
    pub seat_idle_seconds: Option<i32>,
    /// Most recent outbound message containing "dlist.txt".
    pub last_dlist_message: Option<DateTime<Utc>>,
    /// Most recent outbound message containing "PREOP".
    pub last_preop_message: Option<DateTime<Utc>>,
}

/// One card-swipe authentication attempt on a vehicle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeEvent {
    pub card_number: String,
    /// Resolved driver display name, or "No Driver" when the card does
    /// not match a user under the vehicle's customer.
    pub driver_name: String,
    pub swiped_at: DateTime<Utc>,
}

/// Fully merged aggregation result for one vehicle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetails {
    #[serde(flatten)]
    pub info: VehicleInfo,
    /// Supervisor override credential holders, database return order.
    pub master_codes: Vec<String>,
    /// Drivers barred from this vehicle, database return order.
    pub blacklisted_drivers: Vec<String>,
    /// Swipes within the trailing two days, most recent first.
    pub recent_swipes: Vec<SwipeEvent>,
}

/// Customer lookup row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
}

/// Site lookup row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: i64,
    pub customer_id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_external_code() {
        let filter = VehicleFilter {
            code: Some("FLT-100".to_string()),
            site_id: Some(4),
            customer_id: Some(9),
        };
        assert_eq!(
            filter.resolve(),
            Some(ResolvedFilter::ExternalCode("FLT-100".to_string()))
        );
    }

    #[test]
    fn test_resolve_site_beats_customer() {
        let filter = VehicleFilter {
            code: None,
            site_id: Some(4),
            customer_id: Some(9),
        };
        assert_eq!(filter.resolve(), Some(ResolvedFilter::Site(4)));
    }

    #[test]
    fn test_resolve_customer_alone() {
        let filter = VehicleFilter {
            code: None,
            site_id: None,
            customer_id: Some(9),
        };
        assert_eq!(filter.resolve(), Some(ResolvedFilter::Customer(9)));
    }

    #[test]
    fn test_resolve_empty_filter() {
        assert_eq!(VehicleFilter::default().resolve(), None);
    }

    #[test]
    fn test_resolve_blank_code_falls_through() {
        let filter = VehicleFilter {
            code: Some("   ".to_string()),
            site_id: Some(4),
            customer_id: None,
        };
        assert_eq!(filter.resolve(), Some(ResolvedFilter::Site(4)));
    }

    #[test]
    fn test_resolve_trims_code() {
        let filter = VehicleFilter {
            code: Some("  FLT-7 ".to_string()),
            site_id: None,
            customer_id: None,
        };
        assert_eq!(
            filter.resolve(),
            Some(ResolvedFilter::ExternalCode("FLT-7".to_string()))
        );
    }

    #[test]
    fn test_vehicle_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&VehicleStatus::Online).unwrap(),
            "\"online\""
        );
        assert_eq!(
            serde_json::to_string(&VehicleStatus::Offline).unwrap(),
            "\"offline\""
        );
    }
}
