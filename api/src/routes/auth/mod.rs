//! Authentication route handlers
//!
//! This module contains the token endpoints:
//! - Token refresh
//! - Access token verification
//! - Revocation
//! - Caller identity

pub mod me;
pub mod refresh;
pub mod revoke;
pub mod verify;
