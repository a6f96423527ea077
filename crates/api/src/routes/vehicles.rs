//! Fleet vehicle aggregation handlers.
//!
//! The vehicle listing is a read-only fan-out over the FleetIQ database:
//! resolve the filter to a set of internal vehicle codes, batch-fetch the
//! composite info rows plus the per-vehicle sub-lists, then merge them in
//! memory into one response document per vehicle.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use domain::models::{Customer, Site, VehicleDetails, VehicleFilter, VehicleInfo};
use domain::services::telemetry::{derive_status, impact_threshold};
use persistence::entities::{SwipeRow, VehicleInfoRow};
use persistence::repositories::VehicleRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_vehicle_aggregation;

/// GET /api/v1/vehicles
///
/// Accepts exactly one effective filter; `code` wins over `siteId`, which
/// wins over `customerId`. An empty resolution is a 404 rather than an
/// empty list so callers can distinguish "no such fleet" from a fleet
/// whose vehicles all dropped out of the master table.
pub async fn get_vehicles(
    State(state): State<AppState>,
    Query(filter): Query<VehicleFilter>,
) -> Result<Json<Vec<VehicleDetails>>, ApiError> {
    let resolved = filter.resolve().ok_or_else(|| {
        ApiError::Validation("Provide one of code, siteId or customerId".to_string())
    })?;

    let repository = VehicleRepository::new(state.databases.fleet.clone());

    let codes = repository.resolve_codes(&resolved).await?;
    if codes.is_empty() {
        return Err(ApiError::NotFound("No vehicles match the filter".to_string()));
    }

    let (info_rows, master_codes, blacklist, swipes) = tokio::try_join!(
        repository.fetch_info(&codes),
        repository.fetch_master_codes(&codes),
        repository.fetch_blacklisted_drivers(&codes),
        repository.fetch_swipes(&codes),
    )?;

    let offline_after = Duration::seconds(state.config.telemetry.offline_after_secs);
    let details = merge_details(
        &codes,
        info_rows,
        master_codes,
        blacklist,
        swipes,
        Utc::now(),
        offline_after,
    );

    record_vehicle_aggregation(details.len());
    Ok(Json(details))
}

/// Merge the batched sub-fetches into per-vehicle documents, ordered by
/// the resolved code list. Codes without a vehicle-master row produce no
/// document; missing sub-lists become empty lists.
fn merge_details(
    codes: &[i64],
    info_rows: Vec<VehicleInfoRow>,
    mut master_codes: HashMap<i64, Vec<String>>,
    mut blacklist: HashMap<i64, Vec<String>>,
    mut swipes: HashMap<i64, Vec<SwipeRow>>,
    now: DateTime<Utc>,
    offline_after: Duration,
) -> Vec<VehicleDetails> {
    let mut by_code: HashMap<i64, VehicleInfoRow> = info_rows
        .into_iter()
        .map(|row| (row.vehicle_code, row))
        .collect();

    let mut details = Vec::with_capacity(by_code.len());
    for code in codes {
        let Some(row) = by_code.remove(code) else {
            debug!(vehicle_code = code, "Vehicle has no master row, skipping");
            continue;
        };

        let info = VehicleInfo {
            vehicle_code: row.vehicle_code,
            external_code: row.external_code,
            hire_number: row.hire_number,
            serial_number: row.serial_number,
            firmware_version: row.firmware_version,
            screen_version: row.screen_version,
            expansion_version: row.expansion_version,
            department: row.department,
            customer_name: row.customer_name,
            site_name: row.site_name,
            last_connection: row.last_connection,
            status: derive_status(row.last_telemetry, now, offline_after),
            impact_threshold: impact_threshold(row.impact_base, row.impact_multiplier),
            impact_lockout: row.impact_lockout,
            seat_idle_seconds: row.seat_idle_seconds,
            last_dlist_message: row.last_dlist_message,
            last_preop_message: row.last_preop_message,
        };

        details.push(VehicleDetails {
            info,
            master_codes: master_codes.remove(code).unwrap_or_default(),
            blacklisted_drivers: blacklist.remove(code).unwrap_or_default(),
            recent_swipes: swipes
                .remove(code)
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        });
    }
    details
}

/// GET /api/v1/customers
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    if let Some(customers) = state.lookups.customers.get(&()) {
        return Ok(Json(customers));
    }

    let repository = VehicleRepository::new(state.databases.fleet.clone());
    let customers: Vec<Customer> = repository
        .list_customers()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    state.lookups.customers.insert((), customers.clone());
    Ok(Json(customers))
}

/// GET /api/v1/customers/:customer_id/sites
pub async fn list_sites(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> Result<Json<Vec<Site>>, ApiError> {
    if let Some(sites) = state.lookups.sites.get(&customer_id) {
        return Ok(Json(sites));
    }

    let repository = VehicleRepository::new(state.databases.fleet.clone());
    let sites: Vec<Site> = repository
        .list_sites(customer_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    state.lookups.sites.insert(customer_id, sites.clone());
    Ok(Json(sites))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::VehicleStatus;

    fn info_row(code: i64, last_telemetry: Option<DateTime<Utc>>) -> VehicleInfoRow {
        VehicleInfoRow {
            vehicle_code: code,
            external_code: format!("EXT-{code}"),
            hire_number: None,
            serial_number: None,
            firmware_version: None,
            screen_version: None,
            expansion_version: None,
            department: None,
            customer_name: None,
            site_name: None,
            last_connection: None,
            impact_base: Some(10.0),
            impact_multiplier: Some(5.0),
            impact_lockout: None,
            seat_idle_seconds: None,
            last_telemetry,
            last_dlist_message: None,
            last_preop_message: None,
        }
    }

    #[test]
    fn test_merge_follows_resolved_code_order() {
        let now = Utc::now();
        let rows = vec![info_row(30, None), info_row(10, None), info_row(20, None)];
        let details = merge_details(
            &[10, 20, 30],
            rows,
            HashMap::new(),
            HashMap::new(),
            HashMap::new(),
            now,
            Duration::seconds(300),
        );
        let order: Vec<i64> = details.iter().map(|d| d.info.vehicle_code).collect();
        assert_eq!(order, vec![10, 20, 30]);
    }

    #[test]
    fn test_merge_drops_codes_without_info_row() {
        let now = Utc::now();
        let details = merge_details(
            &[1, 2],
            vec![info_row(2, None)],
            HashMap::new(),
            HashMap::new(),
            HashMap::new(),
            now,
            Duration::seconds(300),
        );
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].info.vehicle_code, 2);
    }

    #[test]
    fn test_merge_defaults_missing_sublists_to_empty() {
        let now = Utc::now();
        let mut master = HashMap::new();
        master.insert(1, vec!["Alice".to_string()]);
        let details = merge_details(
            &[1, 2],
            vec![info_row(1, None), info_row(2, None)],
            master,
            HashMap::new(),
            HashMap::new(),
            now,
            Duration::seconds(300),
        );
        assert_eq!(details[0].master_codes, vec!["Alice".to_string()]);
        assert!(details[1].master_codes.is_empty());
        assert!(details[1].blacklisted_drivers.is_empty());
        assert!(details[1].recent_swipes.is_empty());
    }

    #[test]
    fn test_merge_derives_status_and_threshold() {
        let now = Utc::now();
        let details = merge_details(
            &[1, 2],
            vec![
                info_row(1, Some(now - Duration::seconds(10))),
                info_row(2, None),
            ],
            HashMap::new(),
            HashMap::new(),
            HashMap::new(),
            now,
            Duration::seconds(300),
        );
        assert_eq!(details[0].info.status, VehicleStatus::Online);
        assert_eq!(details[1].info.status, VehicleStatus::Offline);
        // round(0.00388 * sqrt(10 * 5 * 10), 3)
        assert_eq!(details[0].info.impact_threshold, 0.087);
    }

    #[test]
    fn test_merge_maps_unmatched_swipe_to_no_driver() {
        let now = Utc::now();
        let mut swipes = HashMap::new();
        swipes.insert(
            1,
            vec![SwipeRow {
                vehicle_code: 1,
                card_number: "C-9".to_string(),
                driver_name: None,
                swiped_at: now,
            }],
        );
        let details = merge_details(
            &[1],
            vec![info_row(1, None)],
            HashMap::new(),
            HashMap::new(),
            swipes,
            now,
            Duration::seconds(300),
        );
        assert_eq!(details[0].recent_swipes[0].driver_name, "No Driver");
    }
}
