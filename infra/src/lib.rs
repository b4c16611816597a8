//! # Infrastructure Layer
//!
//! Concrete store implementations for the Tollgate token service.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis client and the Redis-backed revocation registry

// Re-export core types for convenience
pub use tg_core::errors::*;

/// Cache module - Redis client and revocation store
pub mod cache;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection attempt did not finish in time
    #[error("Connection timed out after {0}s")]
    Timeout(u64),
}
