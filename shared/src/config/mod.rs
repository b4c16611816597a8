//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing, verification and rotation settings
//! - `cache` - Redis configuration for the revocation store
//! - `logging` - Log level and output format
//! - `server` - HTTP server binding

pub mod auth;
pub mod cache;
pub mod logging;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{
    JwtConfig, RefreshRotationMode, MAX_CLOCK_SKEW_SECONDS, MAX_TOKEN_LIFETIME_SECONDS,
};
pub use cache::CacheConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(String),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

/// Where revoked token ids are recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationBackend {
    /// Process-local set, lost on restart
    Memory,
    /// Redis keys expiring with the token
    Redis,
}

impl Default for RevocationBackend {
    fn default() -> Self {
        RevocationBackend::Memory
    }
}

impl std::str::FromStr for RevocationBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(RevocationBackend::Memory),
            "redis" => Ok(RevocationBackend::Redis),
            other => Err(ConfigError::Invalid {
                key: "REVOCATION_BACKEND".to_string(),
                message: format!("unknown backend '{}'", other),
            }),
        }
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Revocation store selection
    #[serde(default)]
    pub revocation_backend: RevocationBackend,

    /// Redis configuration (used when the backend is `redis`)
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment and validate it
    pub fn from_env() -> Result<Self, ConfigError> {
        let revocation_backend = match std::env::var("REVOCATION_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => RevocationBackend::default(),
        };

        let config = Self {
            server: ServerConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            revocation_backend,
            cache: CacheConfig::from_env()?,
            logging: LoggingConfig::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.jwt.validate()?;
        if self.revocation_backend == RevocationBackend::Redis && self.cache.url.trim().is_empty() {
            return Err(ConfigError::Missing("REDIS_URL".to_string()));
        }
        Ok(())
    }
}

/// Reads an environment variable, falling back to `default` when unset or empty
pub(crate) fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

/// Reads and parses an environment variable; unset or empty yields `default`
pub(crate) fn env_parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key: key.to_string(),
                message: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}
