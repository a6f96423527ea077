//! Machine-to-machine token service.
//!
//! Outbound integrations authenticate with a client-credentials bearer token
//! issued by an external identity provider. The current token is persisted in
//! the helpdesk database so restarts reuse it; refreshes are serialized
//! through a mutex so concurrent callers trigger at most one upstream call.

use chrono::{DateTime, Duration, Utc};
use domain::models::M2mToken;
use persistence::repositories::M2mTokenRepository;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::M2mConfig;
use crate::middleware::metrics::record_m2m_refresh;

/// Error type for M2M token operations.
#[derive(Debug, thiserror::Error)]
pub enum M2mError {
    #[error("M2M token endpoint is not configured")]
    NotConfigured,

    #[error("Token endpoint request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Token endpoint returned status {0}")]
    UpstreamStatus(u16),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Issues and caches the machine-to-machine bearer token.
pub struct M2mTokenService {
    config: M2mConfig,
    repository: M2mTokenRepository,
    client: reqwest::Client,
    refresh_lock: Mutex<()>,
}

impl M2mTokenService {
    pub fn new(config: M2mConfig, repository: M2mTokenRepository) -> Self {
        Self {
            config,
            repository,
            client: reqwest::Client::new(),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Returns a token valid for at least the configured refresh margin,
    /// refreshing it against the identity provider when needed.
    pub async fn current_token(&self) -> Result<M2mToken, M2mError> {
        if self.config.token_url.is_empty() {
            return Err(M2mError::NotConfigured);
        }

        let margin = Duration::seconds(self.config.refresh_margin_secs);
        let now = Utc::now();

        if let Some(token) = self.load(now, margin).await? {
            return Ok(token);
        }

        // Single-flight: the first caller refreshes, the rest wait and then
        // re-read the row it stored.
        let _guard = self.refresh_lock.lock().await;
        if let Some(token) = self.load(now, margin).await? {
            debug!("M2M token refreshed by a concurrent caller");
            return Ok(token);
        }

        self.refresh(now).await
    }

    async fn load(
        &self,
        now: DateTime<Utc>,
        margin: Duration,
    ) -> Result<Option<M2mToken>, M2mError> {
        let stored = self.repository.get().await?.map(M2mToken::from);
        Ok(stored.filter(|t| !t.needs_refresh(now, margin)))
    }

    async fn refresh(&self, now: DateTime<Utc>) -> Result<M2mToken, M2mError> {
        let result = self.request_token(now).await;
        record_m2m_refresh(result.is_ok());

        match result {
            Ok(token) => {
                self.repository
                    .upsert(&token.access_token, token.expires_at)
                    .await?;
                info!(expires_at = %token.expires_at, "M2M token refreshed");
                Ok(token)
            }
            Err(e) => {
                warn!(error = %e, "M2M token refresh failed");
                Err(e)
            }
        }
    }

    async fn request_token(&self, now: DateTime<Utc>) -> Result<M2mToken, M2mError> {
        let response = self
            .client
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(M2mError::UpstreamStatus(response.status().as_u16()));
        }

        let body: TokenResponse = response.json().await?;
        Ok(M2mToken {
            access_token: body.access_token,
            expires_at: now + Duration::seconds(body.expires_in),
        })
    }
}
