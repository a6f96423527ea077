//! Snapshot reporting model.
//!
//! Snapshots are timestamped captures of the `vehicle_info` reporting
//! table, paired into before/after buckets per vehicle for comparison.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One captured `vehicle_info` row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotCapture {
    pub vehicle_code: i64,
    pub captured_at: DateTime<Utc>,
    pub hours_run: Option<f64>,
    pub impact_count: Option<i32>,
    pub preop_failures: Option<i32>,
    pub firmware_version: Option<String>,
}

/// Before/after pairing for one vehicle. Either side may be missing when
/// the vehicle was not captured at that timestamp.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotComparison {
    pub vehicle_code: i64,
    pub before: Option<SnapshotCapture>,
    pub after: Option<SnapshotCapture>,
}

/// Query parameters for snapshot comparison.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotCompareQuery {
    pub before: DateTime<Utc>,
    pub after: DateTime<Utc>,
    pub customer_id: Option<i64>,
}

/// Pair capture rows from the two timestamps into per-vehicle buckets.
///
/// Vehicles appearing at either timestamp get an entry; output is ordered
/// by vehicle code for stable responses.
pub fn pair_captures(
    before_rows: Vec<SnapshotCapture>,
    after_rows: Vec<SnapshotCapture>,
) -> Vec<SnapshotComparison> {
    use std::collections::BTreeMap;

    let mut buckets: BTreeMap<i64, (Option<SnapshotCapture>, Option<SnapshotCapture>)> =
        BTreeMap::new();

    for row in before_rows {
        let code = row.vehicle_code;
        buckets.entry(code).or_default().0 = Some(row);
    }
    for row in after_rows {
        let code = row.vehicle_code;
        buckets.entry(code).or_default().1 = Some(row);
    }

    buckets
        .into_iter()
        .map(|(vehicle_code, (before, after))| SnapshotComparison {
            vehicle_code,
            before,
            after,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(vehicle_code: i64, hours: f64) -> SnapshotCapture {
        SnapshotCapture {
            vehicle_code,
            captured_at: Utc::now(),
            hours_run: Some(hours),
            impact_count: Some(0),
            preop_failures: None,
            firmware_version: Some("2.4.1".to_string()),
        }
    }

    #[test]
    fn test_pair_captures_matches_by_vehicle() {
        let pairs = pair_captures(vec![capture(1, 100.0)], vec![capture(1, 110.0)]);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].vehicle_code, 1);
        assert_eq!(pairs[0].before.as_ref().unwrap().hours_run, Some(100.0));
        assert_eq!(pairs[0].after.as_ref().unwrap().hours_run, Some(110.0));
    }

    #[test]
    fn test_pair_captures_keeps_one_sided_vehicles() {
        let pairs = pair_captures(vec![capture(1, 100.0)], vec![capture(2, 50.0)]);
        assert_eq!(pairs.len(), 2);
        assert!(pairs[0].before.is_some() && pairs[0].after.is_none());
        assert!(pairs[1].before.is_none() && pairs[1].after.is_some());
    }

    #[test]
    fn test_pair_captures_orders_by_vehicle_code() {
        let pairs = pair_captures(
            vec![capture(9, 1.0), capture(3, 2.0)],
            vec![capture(5, 3.0)],
        );
        let codes: Vec<i64> = pairs.iter().map(|p| p.vehicle_code).collect();
        assert_eq!(codes, vec![3, 5, 9]);
    }

    #[test]
    fn test_pair_captures_empty_inputs() {
        assert!(pair_captures(vec![], vec![]).is_empty());
    }
}
