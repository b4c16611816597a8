//! Error types for key loading, token handling, revocation and request authentication
//!
//! Each enum carries the specific internal reason of a failure. The reason is
//! meant for logs; callers facing clients go through
//! [`DomainError::public_code`](super::DomainError::public_code) instead.

use thiserror::Error;

/// Key material errors, raised while loading or probing the RSA key pair
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Failed to read key file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid key format: {message}")]
    Format { message: String },
}

/// Token issuance and verification errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid identity: {field} must not be empty")]
    InvalidIdentity { field: String },

    #[error("Token signing failed: {message}")]
    Signing { message: String },

    #[error("Malformed token")]
    MalformedToken,

    #[error("Unexpected signing algorithm: {algorithm}")]
    AlgorithmMismatch { algorithm: String },

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Token issued in the future")]
    TokenIssuedInFuture,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Invalid claims: {reason}")]
    InvalidClaims { reason: String },

    #[error("Invalid token type: expected {expected}, found {found}")]
    InvalidTokenType { expected: String, found: String },

    #[error("Unknown subject")]
    UnknownSubject,
}

impl TokenError {
    /// Shorthand for [`TokenError::InvalidClaims`]
    pub fn invalid_claims(reason: impl Into<String>) -> Self {
        TokenError::InvalidClaims {
            reason: reason.into(),
        }
    }
}

/// Revocation store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RevocationError {
    #[error("Revocation store unavailable: {message}")]
    Store { message: String },
}

/// Request authentication errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing credential")]
    MissingCredential,

    #[error("Malformed credential")]
    MalformedCredential,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(#[source] TokenError),

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

impl AuthError {
    /// The verification failure behind an `AuthenticationFailed`, if any
    pub fn reason(&self) -> Option<&TokenError> {
        match self {
            AuthError::AuthenticationFailed(reason) => Some(reason),
            _ => None,
        }
    }
}
