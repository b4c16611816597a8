//! Shared configuration and common types for the Tollgate services
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The public error response body

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, ConfigError, JwtConfig, LogFormat, LoggingConfig,
    RefreshRotationMode, RevocationBackend, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
