//! Token entities for JWT-based authentication.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::Identity;

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh tokens conventionally live this many times longer than access tokens
pub const REFRESH_TOKEN_TTL_MULTIPLIER: i32 = 24;

/// Default JWT issuer
pub const JWT_ISSUER: &str = "afrikpay-gateway";

/// Default JWT audience
pub const JWT_AUDIENCE: &str = "afrikpay-api";

/// `token_type` claim value of access tokens
pub const ACCESS_TOKEN_TYPE: &str = "access";

/// `token_type` claim value of refresh tokens
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// Scheme reported in [`TokenPair::token_type`]
pub const BEARER_TOKEN_TYPE: &str = "Bearer";

/// Role granting access to administrative routes
pub const ADMIN_ROLE: &str = "admin";

/// Registered claims common to both token kinds
pub trait RegisteredClaims {
    fn token_id(&self) -> &str;
    fn token_type(&self) -> &str;
    fn issuer(&self) -> &str;
    fn audience(&self) -> &str;
    fn issued_at(&self) -> i64;
    fn not_before(&self) -> i64;
    fn expires_at(&self) -> i64;

    /// Expiry as a timestamp; out-of-range values saturate
    fn expiry(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.expires_at(), 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Checks if the claims have expired at `now` (Unix seconds)
    fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at()
    }
}

/// Claims structure for access token payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    #[serde(rename = "sub")]
    pub subject_id: String,

    /// Subject email
    #[serde(default)]
    pub email: String,

    /// Granted roles
    #[serde(default)]
    pub roles: BTreeSet<String>,

    /// Issuer
    #[serde(rename = "iss")]
    pub issuer: String,

    /// Audience
    #[serde(rename = "aud")]
    pub audience: String,

    /// JWT ID (unique identifier for the token)
    #[serde(rename = "jti")]
    pub token_id: String,

    /// Issued at timestamp
    #[serde(rename = "iat")]
    pub issued_at: i64,

    /// Not before timestamp
    #[serde(rename = "nbf")]
    pub not_before: i64,

    /// Expiration timestamp
    #[serde(rename = "exp")]
    pub expires_at: i64,

    /// Token kind discriminator
    #[serde(default = "default_access_type")]
    pub token_type: String,
}

fn default_access_type() -> String {
    ACCESS_TOKEN_TYPE.to_string()
}

impl AccessClaims {
    /// Creates new claims for an access token
    ///
    /// `not_before` equals `issued_at`; a fresh random token id is assigned.
    /// A negative `ttl` yields claims that are already expired.
    pub fn new(
        identity: &Identity,
        issuer: &str,
        audience: &str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let iat = issued_at.timestamp();
        Self {
            subject_id: identity.subject_id.clone(),
            email: identity.email.clone(),
            roles: identity.roles.clone(),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            token_id: Uuid::new_v4().to_string(),
            issued_at: iat,
            not_before: iat,
            expires_at: iat.saturating_add(ttl.num_seconds()),
            token_type: default_access_type(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }

    /// Checks whether the subject holds a role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Checks whether the subject holds at least one of `roles`
    pub fn has_any_role(&self, roles: &BTreeSet<String>) -> bool {
        !self.roles.is_disjoint(roles)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }

    /// Time left before expiry, zero once expired
    pub fn remaining_lifetime(&self) -> Duration {
        let remaining = self.expires_at.saturating_sub(Utc::now().timestamp());
        Duration::try_seconds(remaining.max(0)).unwrap_or(Duration::MAX)
    }

    /// The identity these claims were issued to
    pub fn identity(&self) -> Identity {
        Identity {
            subject_id: self.subject_id.clone(),
            email: self.email.clone(),
            roles: self.roles.clone(),
        }
    }
}

impl RegisteredClaims for AccessClaims {
    fn token_id(&self) -> &str {
        &self.token_id
    }
    fn token_type(&self) -> &str {
        &self.token_type
    }
    fn issuer(&self) -> &str {
        &self.issuer
    }
    fn audience(&self) -> &str {
        &self.audience
    }
    fn issued_at(&self) -> i64 {
        self.issued_at
    }
    fn not_before(&self) -> i64 {
        self.not_before
    }
    fn expires_at(&self) -> i64 {
        self.expires_at
    }
}

/// Claims structure for refresh token payloads
///
/// Email and roles are a snapshot taken at issuance. They are only used when
/// no identity provider is wired to re-derive them on refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject (user ID)
    #[serde(rename = "sub")]
    pub subject_id: String,

    /// Token kind discriminator; must be `refresh`
    #[serde(default)]
    pub token_type: String,

    /// Email snapshot
    #[serde(default)]
    pub email: String,

    /// Roles snapshot
    #[serde(default)]
    pub roles: BTreeSet<String>,

    #[serde(rename = "iss")]
    pub issuer: String,

    #[serde(rename = "aud")]
    pub audience: String,

    #[serde(rename = "jti")]
    pub token_id: String,

    #[serde(rename = "iat")]
    pub issued_at: i64,

    #[serde(rename = "nbf")]
    pub not_before: i64,

    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl RefreshClaims {
    /// Creates new claims for a refresh token
    pub fn new(
        identity: &Identity,
        issuer: &str,
        audience: &str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let iat = issued_at.timestamp();
        Self {
            subject_id: identity.subject_id.clone(),
            token_type: REFRESH_TOKEN_TYPE.to_string(),
            email: identity.email.clone(),
            roles: identity.roles.clone(),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            token_id: Uuid::new_v4().to_string(),
            issued_at: iat,
            not_before: iat,
            expires_at: iat.saturating_add(ttl.num_seconds()),
        }
    }

    /// The identity captured when the token was issued
    pub fn snapshot(&self) -> Identity {
        Identity {
            subject_id: self.subject_id.clone(),
            email: self.email.clone(),
            roles: self.roles.clone(),
        }
    }
}

impl RegisteredClaims for RefreshClaims {
    fn token_id(&self) -> &str {
        &self.token_id
    }
    fn token_type(&self) -> &str {
        &self.token_type
    }
    fn issuer(&self) -> &str {
        &self.issuer
    }
    fn audience(&self) -> &str {
        &self.audience
    }
    fn issued_at(&self) -> i64 {
        self.issued_at
    }
    fn not_before(&self) -> i64 {
        self.not_before
    }
    fn expires_at(&self) -> i64 {
        self.expires_at
    }
}

/// Token pair returned after issuance or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Always `Bearer`
    pub token_type: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: BEARER_TOKEN_TYPE.to_string(),
            expires_in,
        }
    }
}
