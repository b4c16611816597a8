//! Token issuance: identity in, signed access + refresh pair out

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Header};
use serde::Serialize;

use crate::domain::entities::{AccessClaims, Identity, RefreshClaims, TokenPair};
use crate::errors::TokenError;

use super::config::TokenServiceConfig;
use super::key_manager::RsaKeyPair;

/// Signs token pairs with the private half of the key pair
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    keys: Arc<RsaKeyPair>,
    config: Arc<TokenServiceConfig>,
}

impl TokenIssuer {
    pub fn new(keys: Arc<RsaKeyPair>, config: Arc<TokenServiceConfig>) -> Self {
        Self { keys, config }
    }

    /// Whether this issuer holds a private key
    pub fn can_sign(&self) -> bool {
        self.keys.can_sign()
    }

    /// Issues an access + refresh pair for `identity`
    ///
    /// The identity is validated before anything is signed. Both tokens share
    /// one issuance instant and carry distinct token ids. `expires_in` is the
    /// access lifetime in seconds; a negative `access_ttl` is allowed and
    /// produces a token that is already expired.
    ///
    /// # Errors
    ///
    /// * `TokenError::InvalidIdentity` - A blank subject, email or role set
    /// * `TokenError::Signing` - No private key, or the signer failed
    pub fn issue(
        &self,
        identity: &Identity,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<TokenPair, TokenError> {
        identity.validate()?;

        let now = Utc::now();
        let access_claims = AccessClaims::new(
            identity,
            &self.config.issuer,
            &self.config.audience,
            now,
            access_ttl,
        );
        let refresh_claims = RefreshClaims::new(
            identity,
            &self.config.issuer,
            &self.config.audience,
            now,
            refresh_ttl,
        );

        let access_token = self.sign(&access_claims)?;
        let refresh_token = self.sign(&refresh_claims)?;

        tracing::debug!(
            subject_id = %identity.subject_id,
            access_token_id = %access_claims.token_id,
            refresh_token_id = %refresh_claims.token_id,
            "Issued token pair"
        );

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            access_ttl.num_seconds(),
        ))
    }

    /// Issues a pair using the configured default lifetimes
    pub fn issue_default(&self, identity: &Identity) -> Result<TokenPair, TokenError> {
        self.issue(
            identity,
            self.config.access_token_ttl,
            self.config.refresh_token_ttl,
        )
    }

    /// Signs arbitrary claims with the configured algorithm
    pub(crate) fn sign<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        let encoding_key = self.keys.encoding_key().ok_or_else(|| TokenError::Signing {
            message: "private key not loaded".to_string(),
        })?;

        encode(&Header::new(self.config.algorithm), claims, encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Token signing failed");
            TokenError::Signing {
                message: e.to_string(),
            }
        })
    }
}
