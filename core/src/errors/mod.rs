//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, KeyError, RevocationError, TokenError};

use thiserror::Error;
use tg_shared::errors::error_codes;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Revocation(#[from] RevocationError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Broad classes of failure, used to decide how an error is surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The process must not start
    StartupFatal,
    /// The caller sent something unusable
    ClientInput,
    /// The credential was rejected
    SecurityRejection,
    /// A backing store could not answer; the request fails closed
    Infrastructure,
    /// A bug or misconfiguration discovered at request time
    Internal,
}

impl DomainError {
    /// Classifies the error
    pub fn category(&self) -> ErrorCategory {
        match self {
            DomainError::Key(_) => ErrorCategory::StartupFatal,
            DomainError::Revocation(_) => ErrorCategory::Infrastructure,
            DomainError::Internal { .. } => ErrorCategory::Internal,
            DomainError::Token(TokenError::InvalidIdentity { .. }) => ErrorCategory::ClientInput,
            DomainError::Token(TokenError::Signing { .. }) => ErrorCategory::Internal,
            DomainError::Token(_) => ErrorCategory::SecurityRejection,
            DomainError::Auth(AuthError::MissingCredential | AuthError::MalformedCredential) => {
                ErrorCategory::ClientInput
            }
            DomainError::Auth(_) => ErrorCategory::SecurityRejection,
        }
    }

    /// Stable, non-revealing error code for clients
    ///
    /// Every credential problem collapses to `unauthorized` so a client cannot
    /// tell an expired token from a forged or revoked one.
    pub fn public_code(&self) -> &'static str {
        match self {
            DomainError::Auth(AuthError::InsufficientPermissions) => error_codes::FORBIDDEN,
            DomainError::Token(TokenError::InvalidIdentity { .. }) => error_codes::INVALID_REQUEST,
            DomainError::Revocation(_) => error_codes::SERVICE_UNAVAILABLE,
            DomainError::Token(TokenError::Signing { .. })
            | DomainError::Key(_)
            | DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Token(_) | DomainError::Auth(_) => error_codes::UNAUTHORIZED,
        }
    }

    /// Generic message matching [`public_code`](Self::public_code)
    pub fn public_message(&self) -> &'static str {
        match self.public_code() {
            error_codes::FORBIDDEN => "Insufficient permissions",
            error_codes::INVALID_REQUEST => "Invalid request",
            error_codes::SERVICE_UNAVAILABLE => "Service temporarily unavailable",
            error_codes::INTERNAL_ERROR => "Internal server error",
            _ => "Unauthorized",
        }
    }

    /// True when a credential was presented and refused
    pub fn is_security_rejection(&self) -> bool {
        self.category() == ErrorCategory::SecurityRejection
    }

    /// The token-level reason, looking through authentication wrappers
    pub fn token_error(&self) -> Option<&TokenError> {
        match self {
            DomainError::Token(err) => Some(err),
            DomainError::Auth(err) => err.reason(),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
