//! Configuration for the token service

use chrono::Duration;
use jsonwebtoken::Algorithm;
use tg_shared::config::{ConfigError, JwtConfig, RefreshRotationMode};

use crate::domain::entities::token::{
    ACCESS_TOKEN_EXPIRY_MINUTES, JWT_AUDIENCE, JWT_ISSUER, REFRESH_TOKEN_TTL_MULTIPLIER,
};

/// Tolerated clock skew for the issued-at check
pub const DEFAULT_CLOCK_SKEW_SECONDS: i64 = 60;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Issuer written into and required of every token
    pub issuer: String,
    /// Audience written into and required of every token
    pub audience: String,
    /// Algorithm used when signing
    pub algorithm: Algorithm,
    /// Default access token lifetime
    pub access_token_ttl: Duration,
    /// Default refresh token lifetime
    pub refresh_token_ttl: Duration,
    /// How far in the future `iat` may lie before a token is refused
    pub clock_skew: Duration,
    /// What happens to a refresh token once exchanged
    pub refresh_rotation: RefreshRotationMode,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::new(
            JWT_ISSUER,
            JWT_AUDIENCE,
            Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
        )
    }
}

impl TokenServiceConfig {
    /// Creates a configuration whose refresh lifetime is the conventional
    /// multiple of the access lifetime, saturating at [`Duration::MAX`]
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>, access_token_ttl: Duration) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            algorithm: Algorithm::RS256,
            access_token_ttl,
            refresh_token_ttl: access_token_ttl
                .checked_mul(REFRESH_TOKEN_TTL_MULTIPLIER)
                .unwrap_or(Duration::MAX),
            clock_skew: Duration::seconds(DEFAULT_CLOCK_SKEW_SECONDS),
            refresh_rotation: RefreshRotationMode::default(),
        }
    }

    pub fn with_refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = ttl;
        self
    }

    pub fn with_clock_skew(mut self, skew: Duration) -> Self {
        self.clock_skew = skew;
        self
    }

    pub fn with_refresh_rotation(mut self, rotation: RefreshRotationMode) -> Self {
        self.refresh_rotation = rotation;
        self
    }
}

impl TryFrom<&JwtConfig> for TokenServiceConfig {
    type Error = ConfigError;

    /// Validates `config` and converts its second counts into durations
    fn try_from(config: &JwtConfig) -> Result<Self, Self::Error> {
        config.validate()?;

        Ok(Self {
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            algorithm: Algorithm::RS256,
            access_token_ttl: seconds("JWT_ACCESS_TOKEN_EXPIRY", config.access_token_expiry)?,
            refresh_token_ttl: seconds("JWT_REFRESH_TOKEN_EXPIRY", config.refresh_token_expiry)?,
            clock_skew: seconds("JWT_CLOCK_SKEW_SECONDS", config.clock_skew_seconds)?,
            refresh_rotation: config.refresh_rotation,
        })
    }
}

fn seconds(key: &str, value: i64) -> Result<Duration, ConfigError> {
    Duration::try_seconds(value).ok_or_else(|| ConfigError::Invalid {
        key: key.to_string(),
        message: "value is out of range".to_string(),
    })
}
