//! Request authentication from a raw `Authorization` header value

use std::sync::Arc;

use crate::domain::entities::AccessClaims;
use crate::errors::{AuthError, DomainError};
use crate::services::token::TokenAuthority;

/// Prefix of a bearer credential; the scheme is matched case-sensitively
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the token from an `Authorization` header value
///
/// # Errors
///
/// * `AuthError::MissingCredential` - No header
/// * `AuthError::MalformedCredential` - Not `Bearer ` followed by a non-empty token
pub fn extract_bearer_token(authorization: Option<&str>) -> Result<&str, AuthError> {
    let header = authorization.ok_or(AuthError::MissingCredential)?;
    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedCredential)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MalformedCredential);
    }
    Ok(token)
}

/// Turns an `Authorization` header into verified access claims
#[derive(Clone)]
pub struct Authenticator {
    authority: Arc<dyn TokenAuthority>,
}

impl Authenticator {
    pub fn new(authority: Arc<dyn TokenAuthority>) -> Self {
        Self { authority }
    }

    /// Authenticates a request
    ///
    /// Token rejections are wrapped in `AuthError::AuthenticationFailed`
    /// with the reason preserved. A revocation store failure is passed
    /// through unchanged so it can be answered as unavailable, not unauthorized.
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<AccessClaims, DomainError> {
        let token = extract_bearer_token(authorization).map_err(|e| {
            tracing::debug!(reason = %e, "Request carries no usable credential");
            e
        })?;

        match self.authority.verify(token).await {
            Ok(claims) => {
                tracing::debug!(subject_id = %claims.subject_id, "Request authenticated");
                Ok(claims)
            }
            Err(DomainError::Token(reason)) => Err(AuthError::AuthenticationFailed(reason).into()),
            Err(other) => Err(other),
        }
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator").finish_non_exhaustive()
    }
}
