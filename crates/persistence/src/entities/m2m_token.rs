//! Machine-to-machine token entity (single-row table mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the m2m_tokens table.
#[derive(Debug, Clone, FromRow)]
pub struct M2mTokenEntity {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<M2mTokenEntity> for domain::models::M2mToken {
    fn from(entity: M2mTokenEntity) -> Self {
        Self {
            access_token: entity.access_token,
            expires_at: entity.expires_at,
        }
    }
}
