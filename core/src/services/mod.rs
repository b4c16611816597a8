//! Business services containing domain logic and use cases.

pub mod auth;
pub mod token;

// Re-export commonly used types
pub use auth::{extract_bearer_token, require_any_role, Authenticator, RoleGate, BEARER_PREFIX};
pub use token::{
    RsaKeyPair, TokenAuthority, TokenIssuer, TokenService, TokenServiceConfig, TokenVerifier,
};
