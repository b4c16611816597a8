//! Request authentication
//!
//! - Bearer credential extraction
//! - Access token verification through a [`TokenAuthority`](crate::services::token::TokenAuthority)
//! - Role gating

mod authenticator;
mod role_gate;

#[cfg(test)]
mod tests;

pub use authenticator::{extract_bearer_token, Authenticator, BEARER_PREFIX};
pub use role_gate::{require_any_role, RoleGate};
