//! Domain entities representing core business objects.

pub mod identity;
pub mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use identity::Identity;
pub use token::{
    AccessClaims, RefreshClaims, RegisteredClaims, TokenPair, ACCESS_TOKEN_EXPIRY_MINUTES,
    ACCESS_TOKEN_TYPE, ADMIN_ROLE, BEARER_TOKEN_TYPE, JWT_AUDIENCE, JWT_ISSUER,
    REFRESH_TOKEN_TTL_MULTIPLIER, REFRESH_TOKEN_TYPE,
};
