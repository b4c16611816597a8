//! Revocation registry stored in Redis
//!
//! Each revoked token id becomes one key, `<prefix>:revoked:<token id>`,
//! written with `SET NX`. When the token's expiry is known the key expires
//! once the token could no longer pass the expiry check, so the keyspace does
//! not grow without bound. A bare id of unknown lifetime is kept forever.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::RedisError;

use tg_core::errors::RevocationError;
use tg_core::repositories::RevocationRegistry;
use tg_shared::config::CacheConfig;

use super::redis_client::RedisClient;

const REVOKED_MARKER: &str = "1";

/// Redis-backed [`RevocationRegistry`]
///
/// Any Redis failure is reported as [`RevocationError::Store`], which the
/// verifier turns into a rejection.
#[derive(Debug, Clone)]
pub struct RedisRevocationRegistry {
    client: RedisClient,
}

impl RedisRevocationRegistry {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Connects to Redis and builds the registry
    pub async fn connect(config: CacheConfig) -> Result<Self, crate::InfrastructureError> {
        Ok(Self::new(RedisClient::new(config).await?))
    }

    fn key(&self, token_id: &str) -> String {
        revocation_key(self.client.config(), token_id)
    }

    async fn record(&self, token_id: &str, ttl_seconds: Option<u64>) -> Result<bool, RevocationError> {
        let key = self.key(token_id);
        let newly_revoked = match ttl_seconds {
            Some(ttl) => self.client.set_nx_with_expiry(&key, REVOKED_MARKER, ttl).await,
            None => self.client.set_nx(&key, REVOKED_MARKER).await,
        }
        .map_err(store_error)?;

        tracing::debug!(
            token_id = %token_id,
            ttl_seconds = ?ttl_seconds,
            newly_revoked,
            "Recorded revocation in Redis"
        );
        Ok(newly_revoked)
    }
}

#[async_trait]
impl RevocationRegistry for RedisRevocationRegistry {
    /// The token's lifetime is unknown here, so the marker never expires
    async fn revoke(&self, token_id: &str) -> Result<bool, RevocationError> {
        self.record(token_id, marker_ttl(None, Utc::now())).await
    }

    async fn revoke_until(
        &self,
        token_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, RevocationError> {
        self.record(token_id, marker_ttl(Some(expires_at), Utc::now())).await
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, RevocationError> {
        self.client
            .exists(&self.key(token_id))
            .await
            .map_err(store_error)
    }
}

/// Redis key holding the revocation marker for `token_id`
pub(crate) fn revocation_key(config: &CacheConfig, token_id: &str) -> String {
    config.key(&format!("revoked:{}", token_id))
}

/// Lifetime of a revocation marker; `None` keeps it forever
pub(crate) fn marker_ttl(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<u64> {
    expires_at.map(|expires_at| ttl_until(expires_at, now))
}

/// Whole seconds from `now` until `expires_at`, rounded up, at least one
///
/// The marker must not vanish while `now < exp` still holds for the token.
pub(crate) fn ttl_until(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = (expires_at - now).num_milliseconds();
    let seconds = millis / 1000 + i64::from(millis % 1000 > 0);
    seconds.max(1) as u64
}

fn store_error(e: RedisError) -> RevocationError {
    tracing::error!(error = %e, "Revocation store operation failed");
    RevocationError::Store {
        message: e.to_string(),
    }
}
