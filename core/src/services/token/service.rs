//! Main token service implementation

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::domain::entities::{AccessClaims, Identity, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{IdentityProvider, RevocationRegistry};

use super::config::TokenServiceConfig;
use super::issuer::TokenIssuer;
use super::key_manager::RsaKeyPair;
use super::verifier::TokenVerifier;

/// The parts of any token needed to revoke it
#[derive(Deserialize)]
struct RevocationTarget {
    jti: String,
    exp: i64,
}

/// Service tying together issuance, verification, refresh and revocation
pub struct TokenService<R: RevocationRegistry> {
    pub(super) config: Arc<TokenServiceConfig>,
    pub(super) issuer: TokenIssuer,
    pub(super) verifier: TokenVerifier<R>,
    pub(super) registry: Arc<R>,
    pub(super) identity_provider: Option<Arc<dyn IdentityProvider>>,
}

impl<R: RevocationRegistry> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `keys` - RSA key pair; a verify-only pair yields a service that cannot issue
    /// * `registry` - Revocation registry
    /// * `config` - Token service configuration
    pub fn new(keys: RsaKeyPair, registry: R, config: TokenServiceConfig) -> Self {
        Self::from_shared(Arc::new(keys), Arc::new(registry), config)
    }

    /// Creates a service over key and registry handles that are shared elsewhere
    pub fn from_shared(keys: Arc<RsaKeyPair>, registry: Arc<R>, config: TokenServiceConfig) -> Self {
        let config = Arc::new(config);
        Self {
            issuer: TokenIssuer::new(Arc::clone(&keys), Arc::clone(&config)),
            verifier: TokenVerifier::new(keys, Arc::clone(&registry), Arc::clone(&config)),
            registry,
            config,
            identity_provider: None,
        }
    }

    /// Re-derive identities from `provider` on refresh
    pub fn with_identity_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity_provider = Some(provider);
        self
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    pub fn verifier(&self) -> &TokenVerifier<R> {
        &self.verifier
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Issues a token pair with explicit lifetimes
    pub fn issue(
        &self,
        identity: &Identity,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<TokenPair, DomainError> {
        Ok(self.issuer.issue(identity, access_ttl, refresh_ttl)?)
    }

    /// Issues a token pair with the configured lifetimes
    pub fn issue_default(&self, identity: &Identity) -> Result<TokenPair, DomainError> {
        Ok(self.issuer.issue_default(identity)?)
    }

    /// Verifies an access token
    pub async fn verify(&self, token: &str) -> Result<AccessClaims, DomainError> {
        self.verifier.verify(token).await
    }

    /// Revokes the token carried in `token`
    ///
    /// Only the signature is checked: expired tokens can still be revoked,
    /// and revoking twice succeeds. Works for both token kinds.
    pub async fn revoke(&self, token: &str) -> Result<(), DomainError> {
        let target: RevocationTarget = self.verifier.inspect(token)?;
        if target.jti.trim().is_empty() {
            return Err(TokenError::invalid_claims("empty token id").into());
        }

        let expires_at = DateTime::from_timestamp(target.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC);
        let newly_revoked = self.registry.revoke_until(&target.jti, expires_at).await?;

        tracing::info!(
            token_id = %target.jti,
            newly_revoked,
            "Token revoked"
        );
        Ok(())
    }

    /// Revokes a token by id
    pub async fn revoke_id(&self, token_id: &str) -> Result<(), DomainError> {
        let newly_revoked = self.registry.revoke(token_id).await?;
        tracing::info!(token_id = %token_id, newly_revoked, "Token revoked by id");
        Ok(())
    }

    /// Checks whether a token id has been revoked
    pub async fn is_revoked(&self, token_id: &str) -> Result<bool, DomainError> {
        Ok(self.registry.is_revoked(token_id).await?)
    }

    /// Whether a token is past its expiry; unverifiable tokens count as expired
    pub fn is_expired(&self, token: &str) -> bool {
        self.verifier.is_expired(token)
    }
}
