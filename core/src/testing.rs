//! Fixtures and doubles for test suites
//!
//! Compiled for this crate's unit tests and, with the `testing` feature, for
//! other crates' tests. The bundled keys are throwaway and must never be used
//! outside tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::domain::entities::{AccessClaims, Identity, TokenPair};
use crate::errors::{DomainError, RevocationError, TokenError};
use crate::repositories::InMemoryRevocationRegistry;
use crate::services::token::{RsaKeyPair, TokenAuthority, TokenService, TokenServiceConfig};

pub use crate::repositories::UnavailableRevocationRegistry;

/// RSA 2048 private key, PKCS#8
pub const TEST_PRIVATE_KEY_PEM: &str = include_str!("../keys/test_private_key.pem");
/// Same key as [`TEST_PRIVATE_KEY_PEM`], PKCS#1
pub const TEST_PRIVATE_KEY_PKCS1_PEM: &str = include_str!("../keys/test_private_key_pkcs1.pem");
/// Public half of [`TEST_PRIVATE_KEY_PEM`]
pub const TEST_PUBLIC_KEY_PEM: &str = include_str!("../keys/test_public_key.pem");
/// An unrelated RSA private key
pub const OTHER_PRIVATE_KEY_PEM: &str = include_str!("../keys/other_private_key.pem");
/// Public half of [`OTHER_PRIVATE_KEY_PEM`]
pub const OTHER_PUBLIC_KEY_PEM: &str = include_str!("../keys/other_public_key.pem");
/// P-256 private key, PKCS#8
pub const EC_PRIVATE_KEY_PEM: &str = include_str!("../keys/ec_private_key.pem");
/// Public half of [`EC_PRIVATE_KEY_PEM`]
pub const EC_PUBLIC_KEY_PEM: &str = include_str!("../keys/ec_public_key.pem");

/// Path of the test key directory, for file-loading tests
pub fn test_keys_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("keys")
}

/// The test key pair
pub fn test_key_pair() -> RsaKeyPair {
    RsaKeyPair::from_pem(TEST_PRIVATE_KEY_PEM.as_bytes(), TEST_PUBLIC_KEY_PEM.as_bytes())
        .expect("bundled test keys are valid")
}

/// A subject holding `user` and `admin`
pub fn test_identity() -> Identity {
    Identity::new("user123", "test@example.com", ["user", "admin"])
}

/// Token service over the test keys and an empty in-memory registry
pub fn test_service() -> TokenService<InMemoryRevocationRegistry> {
    TokenService::new(
        test_key_pair(),
        InMemoryRevocationRegistry::new(),
        TokenServiceConfig::default(),
    )
}

/// Unsigned access claims for `identity`, valid for 15 minutes from now
pub fn access_claims_for(identity: &Identity) -> AccessClaims {
    let config = TokenServiceConfig::default();
    AccessClaims::new(
        identity,
        &config.issuer,
        &config.audience,
        Utc::now(),
        Duration::minutes(15),
    )
}

/// What a [`StaticTokenAuthority`] answers to verify and refresh
#[derive(Debug, Clone)]
pub enum StaticOutcome {
    Accept(AccessClaims),
    Reject(TokenError),
    StoreUnavailable,
}

/// A token authority with canned answers and no cryptography
#[derive(Debug)]
pub struct StaticTokenAuthority {
    outcome: StaticOutcome,
    revoked: Mutex<Vec<String>>,
}

impl StaticTokenAuthority {
    pub fn new(outcome: StaticOutcome) -> Self {
        Self {
            outcome,
            revoked: Mutex::new(Vec::new()),
        }
    }

    /// Accepts every token as belonging to `claims`
    pub fn accepting(claims: AccessClaims) -> Self {
        Self::new(StaticOutcome::Accept(claims))
    }

    /// Rejects every token with `reason`
    pub fn rejecting(reason: TokenError) -> Self {
        Self::new(StaticOutcome::Reject(reason))
    }

    /// Fails every lookup as if the revocation store were down
    pub fn unavailable() -> Self {
        Self::new(StaticOutcome::StoreUnavailable)
    }

    /// Tokens and ids passed to `revoke`/`revoke_id`, in call order
    pub fn revoked(&self) -> Vec<String> {
        self.revoked
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn outcome(&self) -> Result<&AccessClaims, DomainError> {
        match &self.outcome {
            StaticOutcome::Accept(claims) => Ok(claims),
            StaticOutcome::Reject(reason) => Err(reason.clone().into()),
            StaticOutcome::StoreUnavailable => Err(RevocationError::Store {
                message: "static store unavailable".to_string(),
            }
            .into()),
        }
    }

    fn record(&self, value: &str) {
        self.revoked
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(value.to_string());
    }
}

#[async_trait]
impl TokenAuthority for StaticTokenAuthority {
    fn issue(
        &self,
        identity: &Identity,
        access_ttl: Duration,
        _refresh_ttl: Duration,
    ) -> Result<TokenPair, DomainError> {
        identity.validate()?;
        Ok(TokenPair::new(
            format!("static-access-{}", identity.subject_id),
            format!("static-refresh-{}", identity.subject_id),
            access_ttl.num_seconds(),
        ))
    }

    fn issue_default(&self, identity: &Identity) -> Result<TokenPair, DomainError> {
        self.issue(identity, Duration::minutes(15), Duration::hours(6))
    }

    async fn verify(&self, _token: &str) -> Result<AccessClaims, DomainError> {
        self.outcome().cloned()
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<TokenPair, DomainError> {
        let identity = self.outcome()?.identity();
        self.issue_default(&identity)
    }

    async fn revoke(&self, token: &str) -> Result<(), DomainError> {
        if let StaticOutcome::StoreUnavailable = self.outcome {
            self.outcome()?;
        }
        self.record(token);
        Ok(())
    }

    async fn revoke_id(&self, token_id: &str) -> Result<(), DomainError> {
        if let StaticOutcome::StoreUnavailable = self.outcome {
            self.outcome()?;
        }
        self.record(token_id);
        Ok(())
    }
}
