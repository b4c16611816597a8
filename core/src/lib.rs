//! # Tollgate Core
//!
//! Core token authority for the Tollgate authentication service.
//! This crate contains the identity and claims entities, RSA key loading,
//! token issuance, verification, refresh and revocation, request
//! authentication, and the error types shared by the outer layers.
//!
//! It performs no environment lookups and no network I/O of its own;
//! configuration and stores are handed in by the caller.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
