//! Token verification
//!
//! A token is accepted only after passing, in order:
//!
//! 1. Parse: three base64url segments with a JSON header
//! 2. Algorithm: the header names an RSA signature algorithm
//! 3. Signature: verified against the public key, claims decoded
//! 4. Lifetime: not expired, already valid, not issued in the future
//! 5. Revocation: the token id is not in the registry
//! 6. Fields: expected token type, issuer, audience and identity fields
//!
//! The first failing step decides the error.

use std::str::FromStr;
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, Validation};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::entities::{
    AccessClaims, RefreshClaims, RegisteredClaims, ACCESS_TOKEN_TYPE, REFRESH_TOKEN_TYPE,
};
use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationRegistry;

use super::config::TokenServiceConfig;
use super::key_manager::RsaKeyPair;

/// Header algorithms accepted for verification
pub const ACCEPTED_ALGORITHMS: [&str; 6] = ["RS256", "RS384", "RS512", "PS256", "PS384", "PS512"];

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

#[derive(Deserialize)]
struct ExpiryOnly {
    exp: i64,
}

/// Verifies tokens against the public key and the revocation registry
pub struct TokenVerifier<R: RevocationRegistry> {
    keys: Arc<RsaKeyPair>,
    registry: Arc<R>,
    config: Arc<TokenServiceConfig>,
}

impl<R: RevocationRegistry> TokenVerifier<R> {
    pub fn new(keys: Arc<RsaKeyPair>, registry: Arc<R>, config: Arc<TokenServiceConfig>) -> Self {
        Self {
            keys,
            registry,
            config,
        }
    }

    /// Verifies an access token and returns its claims
    ///
    /// Revocation store failures surface as `DomainError::Revocation`; every
    /// other rejection is a `DomainError::Token`.
    pub async fn verify(&self, token: &str) -> Result<AccessClaims, DomainError> {
        let result = self.verify_access(token).await;
        if let Err(e) = &result {
            tracing::warn!(reason = %e, "Access token rejected");
        }
        result
    }

    /// Verifies a refresh token and returns its claims
    pub async fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, DomainError> {
        let claims: RefreshClaims = self.decode_verified(token)?;
        self.check_lifetime(&claims, Utc::now().timestamp())?;
        self.check_revocation(&claims.token_id).await?;
        self.check_registered(&claims, REFRESH_TOKEN_TYPE)?;
        if claims.subject_id.trim().is_empty() {
            return Err(TokenError::invalid_claims("empty subject").into());
        }
        Ok(claims)
    }

    /// Decodes a token whose signature checks out, skipping lifetime,
    /// revocation and field checks
    pub fn inspect<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        self.decode_verified(token)
    }

    /// Whether a token is past its expiry; unverifiable tokens count as expired
    pub fn is_expired(&self, token: &str) -> bool {
        match self.decode_verified::<ExpiryOnly>(token) {
            Ok(claims) => Utc::now().timestamp() >= claims.exp,
            Err(_) => true,
        }
    }

    async fn verify_access(&self, token: &str) -> Result<AccessClaims, DomainError> {
        let claims: AccessClaims = self.decode_verified(token)?;
        self.check_lifetime(&claims, Utc::now().timestamp())?;
        self.check_revocation(&claims.token_id).await?;
        self.check_registered(&claims, ACCESS_TOKEN_TYPE)?;

        if claims.subject_id.trim().is_empty() {
            return Err(TokenError::invalid_claims("empty subject").into());
        }
        if claims.email.trim().is_empty() {
            return Err(TokenError::invalid_claims("empty email").into());
        }
        if claims.roles.is_empty() {
            return Err(TokenError::invalid_claims("empty roles").into());
        }
        Ok(claims)
    }

    // Steps 1-3
    fn decode_verified<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        let algorithm = parse_algorithm(token)?;

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<T>(token, self.keys.decoding_key(), &validation)
            .map(|data| data.claims)
            .map_err(map_decode_error)
    }

    // Step 4
    fn check_lifetime<C: RegisteredClaims>(&self, claims: &C, now: i64) -> Result<(), TokenError> {
        if now >= claims.expires_at() {
            return Err(TokenError::TokenExpired);
        }
        if now < claims.not_before() {
            return Err(TokenError::TokenNotYetValid);
        }
        if claims.issued_at() > now + self.config.clock_skew.num_seconds() {
            return Err(TokenError::TokenIssuedInFuture);
        }
        Ok(())
    }

    // Step 5
    async fn check_revocation(&self, token_id: &str) -> Result<(), DomainError> {
        match self.registry.is_revoked(token_id).await {
            Ok(false) => Ok(()),
            Ok(true) => Err(TokenError::TokenRevoked.into()),
            Err(e) => {
                tracing::error!(error = %e, token_id = %token_id, "Revocation lookup failed, rejecting token");
                Err(e.into())
            }
        }
    }

    // Step 6, the parts shared by both token kinds
    fn check_registered<C: RegisteredClaims>(&self, claims: &C, expected_type: &str) -> Result<(), TokenError> {
        if claims.token_type() != expected_type {
            return Err(TokenError::InvalidTokenType {
                expected: expected_type.to_string(),
                found: claims.token_type().to_string(),
            });
        }
        if claims.issuer() != self.config.issuer {
            return Err(TokenError::invalid_claims("issuer mismatch"));
        }
        if claims.audience() != self.config.audience {
            return Err(TokenError::invalid_claims("audience mismatch"));
        }
        if claims.token_id().trim().is_empty() {
            return Err(TokenError::invalid_claims("empty token id"));
        }
        Ok(())
    }
}

fn parse_algorithm(token: &str) -> Result<Algorithm, TokenError> {
    let mut segments = token.splitn(3, '.');
    let (Some(header), Some(payload), Some(signature)) =
        (segments.next(), segments.next(), segments.next())
    else {
        return Err(TokenError::MalformedToken);
    };
    if header.is_empty() || payload.is_empty() {
        return Err(TokenError::MalformedToken);
    }

    let header = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| TokenError::MalformedToken)?;
    URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenError::MalformedToken)?;
    let header: RawHeader =
        serde_json::from_slice(&header).map_err(|_| TokenError::MalformedToken)?;

    if !ACCEPTED_ALGORITHMS.contains(&header.alg.as_str()) {
        return Err(TokenError::AlgorithmMismatch { algorithm: header.alg });
    }
    let algorithm = Algorithm::from_str(&header.alg).map_err(|_| TokenError::AlgorithmMismatch {
        algorithm: header.alg.clone(),
    })?;

    // Header and payload are intact, so extra separators belong to a damaged signature
    if signature.contains('.') {
        return Err(TokenError::InvalidSignature);
    }
    Ok(algorithm)
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        // Header and payload encoding were checked while parsing, so a base64
        // failure here comes from the signature segment.
        ErrorKind::InvalidSignature | ErrorKind::Base64(_) | ErrorKind::InvalidRsaKey(_) => {
            TokenError::InvalidSignature
        }
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::AlgorithmMismatch {
                algorithm: "unsupported".to_string(),
            }
        }
        ErrorKind::Json(e) => TokenError::invalid_claims(format!("unreadable claims: {}", e)),
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::MissingRequiredClaim(_) => TokenError::invalid_claims(err.to_string()),
        _ => TokenError::MalformedToken,
    }
}
