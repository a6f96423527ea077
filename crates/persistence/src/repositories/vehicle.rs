//! Vehicle repository over the FleetIQ telemetry database.
//!
//! All queries are read-only. The fan-out queries take the full code set
//! as one `ANY($1)` parameter; results are merged in application memory
//! keyed by the internal vehicle code.

use std::collections::HashMap;

use sqlx::PgPool;

use crate::entities::{CustomerRow, SiteRow, SwipeRow, VehicleInfoRow, VehicleNameRow};
use domain::models::ResolvedFilter;

/// Repository for vehicle-related database operations.
#[derive(Clone)]
pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    /// Creates a new VehicleRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve a filter into the ordered set of internal vehicle codes.
    pub async fn resolve_codes(&self, filter: &ResolvedFilter) -> Result<Vec<i64>, sqlx::Error> {
        let rows: Vec<(i64,)> = match filter {
            ResolvedFilter::ExternalCode(code) => {
                sqlx::query_as(
                    r#"
                    SELECT code FROM vehicles
                    WHERE external_code = $1
                    ORDER BY code
                    "#,
                )
                .bind(code)
                .fetch_all(&self.pool)
                .await?
            }
            ResolvedFilter::Site(site_id) => {
                sqlx::query_as(
                    r#"
                    SELECT code FROM vehicles
                    WHERE site_id = $1
                    ORDER BY code
                    "#,
                )
                .bind(site_id)
                .fetch_all(&self.pool)
                .await?
            }
            ResolvedFilter::Customer(customer_id) => {
                sqlx::query_as(
                    r#"
                    SELECT code FROM vehicles
                    WHERE customer_id = $1
                    ORDER BY code
                    "#,
                )
                .bind(customer_id)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows.into_iter().map(|(code,)| code).collect())
    }

    /// Batch-fetch the composite info row for every code that has a
    /// vehicle-master row. Codes without one produce no row.
    ///
    /// The newest telemetry timestamp is restricted to the trailing
    /// one-day lookback; the two message timestamps match outbound
    /// message content case-insensitively.
    pub async fn fetch_info(&self, codes: &[i64]) -> Result<Vec<VehicleInfoRow>, sqlx::Error> {
        sqlx::query_as::<_, VehicleInfoRow>(
            r#"
            SELECT v.code AS vehicle_code,
                   v.external_code,
                   m.hire_number,
                   m.serial_number,
                   m.firmware_version,
                   m.screen_version,
                   m.expansion_version,
                   m.department,
                   c.name AS customer_name,
                   s.name AS site_name,
                   m.last_connection,
                   m.impact_base,
                   m.impact_multiplier,
                   m.impact_lockout,
                   m.seat_idle_seconds,
                   (SELECT MAX(t.recorded_at)
                      FROM telemetry_events t
                     WHERE t.vehicle_code = v.code
                       AND t.recorded_at > NOW() - INTERVAL '1 day') AS last_telemetry,
                   (SELECT MAX(o.sent_at)
                      FROM outbound_messages o
                     WHERE o.vehicle_code = v.code
                       AND o.content ILIKE '%dlist.txt%') AS last_dlist_message,
                   (SELECT MAX(o.sent_at)
                      FROM outbound_messages o
                     WHERE o.vehicle_code = v.code
                       AND o.content ILIKE '%PREOP%') AS last_preop_message
            FROM vehicles v
            JOIN vehicle_master m ON m.vehicle_code = v.code
            LEFT JOIN customers c ON c.id = v.customer_id
            LEFT JOIN sites s ON s.id = v.site_id
            WHERE v.code = ANY($1)
            "#,
        )
        .bind(codes)
        .fetch_all(&self.pool)
        .await
    }

    /// Master override credential holders, grouped by vehicle code in
    /// database return order. Codes with no rows are absent from the map.
    pub async fn fetch_master_codes(
        &self,
        codes: &[i64],
    ) -> Result<HashMap<i64, Vec<String>>, sqlx::Error> {
        let rows = sqlx::query_as::<_, VehicleNameRow>(
            r#"
            SELECT mc.vehicle_code, d.display_name
            FROM master_codes mc
            JOIN drivers d ON d.id = mc.driver_id
            WHERE mc.vehicle_code = ANY($1)
            "#,
        )
        .bind(codes)
        .fetch_all(&self.pool)
        .await?;
        Ok(group_names(rows))
    }

    /// Blacklisted drivers, grouped by vehicle code in database return
    /// order. Codes with no rows are absent from the map.
    pub async fn fetch_blacklisted_drivers(
        &self,
        codes: &[i64],
    ) -> Result<HashMap<i64, Vec<String>>, sqlx::Error> {
        let rows = sqlx::query_as::<_, VehicleNameRow>(
            r#"
            SELECT bd.vehicle_code, d.display_name
            FROM blacklisted_drivers bd
            JOIN drivers d ON d.id = bd.driver_id
            WHERE bd.vehicle_code = ANY($1)
            "#,
        )
        .bind(codes)
        .fetch_all(&self.pool)
        .await?;
        Ok(group_names(rows))
    }

    /// Card-swipe attempts within the trailing two-day window, grouped by
    /// vehicle code, most recent first. A swipe resolves to a driver name
    /// only when the card belongs to a driver under the vehicle's
    /// customer.
    pub async fn fetch_swipes(
        &self,
        codes: &[i64],
    ) -> Result<HashMap<i64, Vec<SwipeRow>>, sqlx::Error> {
        let rows = sqlx::query_as::<_, SwipeRow>(
            r#"
            SELECT cs.vehicle_code,
                   cs.card_number,
                   d.display_name AS driver_name,
                   cs.swiped_at
            FROM card_swipes cs
            JOIN vehicles v ON v.code = cs.vehicle_code
            LEFT JOIN drivers d
                   ON d.card_number = cs.card_number
                  AND d.customer_id = v.customer_id
            WHERE cs.vehicle_code = ANY($1)
              AND cs.swiped_at > NOW() - INTERVAL '2 days'
            ORDER BY cs.vehicle_code ASC, cs.swiped_at DESC
            "#,
        )
        .bind(codes)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<SwipeRow>> = HashMap::new();
        for row in rows {
            grouped.entry(row.vehicle_code).or_default().push(row);
        }
        Ok(grouped)
    }

    /// All customers, sorted by name.
    pub async fn list_customers(&self) -> Result<Vec<CustomerRow>, sqlx::Error> {
        sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, name FROM customers
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// All sites belonging to a customer, sorted by name.
    pub async fn list_sites(&self, customer_id: i64) -> Result<Vec<SiteRow>, sqlx::Error> {
        sqlx::query_as::<_, SiteRow>(
            r#"
            SELECT id, customer_id, name FROM sites
            WHERE customer_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
    }
}

/// Group (vehicle_code, display_name) rows into per-vehicle name lists,
/// preserving the database return order within each vehicle.
fn group_names(rows: Vec<VehicleNameRow>) -> HashMap<i64, Vec<String>> {
    let mut grouped: HashMap<i64, Vec<String>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.vehicle_code)
            .or_default()
            .push(row.display_name);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_row(vehicle_code: i64, name: &str) -> VehicleNameRow {
        VehicleNameRow {
            vehicle_code,
            display_name: name.to_string(),
        }
    }

    #[test]
    fn test_group_names_preserves_return_order() {
        let grouped = group_names(vec![
            name_row(1, "Avery"),
            name_row(2, "Blake"),
            name_row(1, "Casey"),
        ]);
        assert_eq!(grouped[&1], vec!["Avery".to_string(), "Casey".to_string()]);
        assert_eq!(grouped[&2], vec!["Blake".to_string()]);
    }

    #[test]
    fn test_group_names_omits_absent_codes() {
        let grouped = group_names(vec![name_row(1, "Avery")]);
        assert!(!grouped.contains_key(&2));
    }

    #[test]
    fn test_group_names_empty_input() {
        assert!(group_names(vec![]).is_empty());
    }
}
