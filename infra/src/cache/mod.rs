//! Cache module for Redis-backed storage
//!
//! This module provides the Redis client and the revocation registry built
//! on top of it.

pub mod redis_client;
pub mod revocation_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationRegistry;

// Re-export commonly used types
pub use tg_shared::config::CacheConfig;
