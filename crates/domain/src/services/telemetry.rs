//! Telemetry-derived vehicle fields.
//!
//! Status rule: a vehicle is online iff its most recent telemetry event
//! within the trailing one-day lookback is not strictly older than the
//! configured offline threshold. The boundary is exclusive: an event aged
//! exactly at the threshold still counts as online.

use chrono::{DateTime, Duration, Utc};

use crate::models::VehicleStatus;

/// Trailing window queried for telemetry events.
pub const TELEMETRY_LOOKBACK_DAYS: i64 = 1;

/// Default offline threshold in seconds.
pub const DEFAULT_OFFLINE_AFTER_SECS: i64 = 300;

/// Derive online/offline status from the newest telemetry timestamp.
///
/// `None` (no telemetry within the lookback window) is offline.
pub fn derive_status(
    last_telemetry: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    offline_after: Duration,
) -> VehicleStatus {
    match last_telemetry {
        Some(ts) if now - ts <= offline_after => VehicleStatus::Online,
        _ => VehicleStatus::Offline,
    }
}

/// Impact threshold derived from the vehicle's base and multiplier
/// settings: `round(0.00388 * sqrt(max(base,0) * max(mult,0) * 10), 3)`.
/// Missing inputs are treated as zero.
pub fn impact_threshold(base: Option<f64>, multiplier: Option<f64>) -> f64 {
    let base = base.unwrap_or(0.0).max(0.0);
    let multiplier = multiplier.unwrap_or(0.0).max(0.0);
    let raw = 0.00388 * (base * multiplier * 10.0).sqrt();
    (raw * 1000.0).round() / 1000.0
}
