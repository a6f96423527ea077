//! Machine-to-machine token model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A bearer token for outbound machine-to-machine calls, persisted as a
/// single row and refreshed when close to expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct M2mToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl M2mToken {
    /// Whether the token should be refreshed, applying a safety margin so
    /// callers never hand out a token about to expire mid-flight.
    pub fn needs_refresh(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        self.expires_at - margin <= now
    }
}
