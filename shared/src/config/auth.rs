//! Token signing and verification configuration

use serde::{Deserialize, Serialize};

use super::{env_or, env_parse_or, ConfigError};

/// How a refresh token behaves after it has been exchanged for a new pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefreshRotationMode {
    /// The presented refresh token is revoked as part of the exchange
    SingleUse,
    /// The presented refresh token stays valid until its own expiry
    Reusable,
}

impl Default for RefreshRotationMode {
    fn default() -> Self {
        RefreshRotationMode::SingleUse
    }
}

impl std::str::FromStr for RefreshRotationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single-use" | "single_use" | "singleuse" => Ok(RefreshRotationMode::SingleUse),
            "reusable" | "reuse" => Ok(RefreshRotationMode::Reusable),
            other => Err(ConfigError::Invalid {
                key: "JWT_REFRESH_ROTATION".to_string(),
                message: format!("unknown rotation mode '{}'", other),
            }),
        }
    }
}

/// Longest accepted token lifetime, ten years
pub const MAX_TOKEN_LIFETIME_SECONDS: i64 = 10 * 365 * 24 * 3600;

/// Largest accepted clock skew, one day
pub const MAX_CLOCK_SKEW_SECONDS: i64 = 24 * 3600;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Path to the PEM-encoded RSA private key (PKCS#8 or PKCS#1)
    pub private_key_path: String,

    /// Path to the PEM-encoded RSA public key (PKIX)
    pub public_key_path: String,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// Tolerated clock skew for the issued-at check, in seconds
    #[serde(default = "default_clock_skew")]
    pub clock_skew_seconds: i64,

    /// Refresh token rotation policy
    #[serde(default)]
    pub refresh_rotation: RefreshRotationMode,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            private_key_path: String::from("config/keys/private.pem"),
            public_key_path: String::from("config/keys/public.pem"),
            issuer: String::from("afrikpay-gateway"),
            audience: String::from("afrikpay-api"),
            access_token_expiry: 900,      // 15 minutes
            refresh_token_expiry: 604800,  // 7 days
            clock_skew_seconds: default_clock_skew(),
            refresh_rotation: RefreshRotationMode::default(),
        }
    }
}

impl JwtConfig {
    /// Create from environment variables
    ///
    /// `JWT_ACCESS_TOKEN_EXPIRY` is read in minutes and
    /// `JWT_REFRESH_TOKEN_EXPIRY` in hours.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let access_minutes: i64 =
            env_parse_or("JWT_ACCESS_TOKEN_EXPIRY", defaults.access_token_expiry / 60)?;
        let refresh_hours: i64 =
            env_parse_or("JWT_REFRESH_TOKEN_EXPIRY", defaults.refresh_token_expiry / 3600)?;
        let refresh_rotation = match std::env::var("JWT_REFRESH_ROTATION") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.refresh_rotation,
        };

        let access_token_expiry = access_minutes
            .checked_mul(60)
            .ok_or_else(|| out_of_range("JWT_ACCESS_TOKEN_EXPIRY"))?;
        let refresh_token_expiry = refresh_hours
            .checked_mul(3600)
            .ok_or_else(|| out_of_range("JWT_REFRESH_TOKEN_EXPIRY"))?;

        Ok(Self {
            private_key_path: env_or("JWT_PRIVATE_KEY_PATH", &defaults.private_key_path),
            public_key_path: env_or("JWT_PUBLIC_KEY_PATH", &defaults.public_key_path),
            issuer: env_or("JWT_ISSUER", &defaults.issuer),
            audience: env_or("JWT_AUDIENCE", &defaults.audience),
            access_token_expiry,
            refresh_token_expiry,
            clock_skew_seconds: env_parse_or("JWT_CLOCK_SKEW_SECONDS", defaults.clock_skew_seconds)?,
            refresh_rotation,
        })
    }

    /// Set access token expiry in minutes; overflow saturates and fails validation
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes.saturating_mul(60);
        self
    }

    /// Set refresh token expiry in hours; overflow saturates and fails validation
    pub fn with_refresh_expiry_hours(mut self, hours: i64) -> Self {
        self.refresh_token_expiry = hours.saturating_mul(3600);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.private_key_path.trim().is_empty() {
            return Err(ConfigError::Missing("JWT_PRIVATE_KEY_PATH".to_string()));
        }
        if self.public_key_path.trim().is_empty() {
            return Err(ConfigError::Missing("JWT_PUBLIC_KEY_PATH".to_string()));
        }
        if self.issuer.trim().is_empty() {
            return Err(ConfigError::Missing("JWT_ISSUER".to_string()));
        }
        if self.audience.trim().is_empty() {
            return Err(ConfigError::Missing("JWT_AUDIENCE".to_string()));
        }
        if self.access_token_expiry <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_TOKEN_EXPIRY".to_string(),
                message: "access token expiry must be positive".to_string(),
            });
        }
        if self.refresh_token_expiry <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_REFRESH_TOKEN_EXPIRY".to_string(),
                message: "refresh token expiry must be positive".to_string(),
            });
        }
        if self.access_token_expiry > MAX_TOKEN_LIFETIME_SECONDS {
            return Err(out_of_range("JWT_ACCESS_TOKEN_EXPIRY"));
        }
        if self.refresh_token_expiry > MAX_TOKEN_LIFETIME_SECONDS {
            return Err(out_of_range("JWT_REFRESH_TOKEN_EXPIRY"));
        }
        if self.clock_skew_seconds < 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_CLOCK_SKEW_SECONDS".to_string(),
                message: "clock skew cannot be negative".to_string(),
            });
        }
        if self.clock_skew_seconds > MAX_CLOCK_SKEW_SECONDS {
            return Err(out_of_range("JWT_CLOCK_SKEW_SECONDS"));
        }
        Ok(())
    }
}

fn default_clock_skew() -> i64 {
    60
}

fn out_of_range(key: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        message: "value is out of range".to_string(),
    }
}
