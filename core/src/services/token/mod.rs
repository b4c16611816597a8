//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - RSA key loading and probing
//! - Access and refresh token issuance
//! - Verification against signature, lifetime, revocation and claims
//! - Refresh with optional single-use rotation
//! - Revocation by token or token id

mod authority;
mod config;
mod issuer;
mod key_manager;
mod refresh;
mod service;
mod verifier;

#[cfg(test)]
mod tests;

pub use authority::TokenAuthority;
pub use config::{TokenServiceConfig, DEFAULT_CLOCK_SKEW_SECONDS};
pub use issuer::TokenIssuer;
pub use key_manager::RsaKeyPair;
pub use service::TokenService;
pub use verifier::{TokenVerifier, ACCEPTED_ALGORITHMS};
