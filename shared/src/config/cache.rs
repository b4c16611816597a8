//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::{env_or, env_parse_or, ConfigError};

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Cache key prefix
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            key_prefix: default_key_prefix(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            url: env_or("REDIS_URL", &defaults.url),
            connection_timeout: env_parse_or("REDIS_CONNECTION_TIMEOUT", defaults.connection_timeout)?,
            key_prefix: env_or("REDIS_KEY_PREFIX", &defaults.key_prefix),
        })
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Builds a namespaced key
    pub fn key(&self, suffix: &str) -> String {
        if self.key_prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}:{}", self.key_prefix, suffix)
        }
    }
}

fn default_key_prefix() -> String {
    String::from("tollgate")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.key_prefix, "tollgate");
    }

    #[test]
    fn test_key_prefixing() {
        let config = CacheConfig::new("redis://cache:6379");
        assert_eq!(config.key("revoked:abc"), "tollgate:revoked:abc");

        let bare = CacheConfig {
            key_prefix: String::new(),
            ..Default::default()
        };
        assert_eq!(bare.key("revoked:abc"), "revoked:abc");
    }
}
