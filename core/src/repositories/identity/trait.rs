//! Identity provider trait: the current view of a subject

use async_trait::async_trait;

use crate::domain::entities::Identity;
use crate::errors::DomainError;

/// Source of truth for a subject's email and roles
///
/// When wired into the token service, refresh re-derives the identity from
/// here instead of trusting the snapshot carried in the refresh token, so
/// role changes take effect at the next refresh.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Look up a subject
    ///
    /// # Returns
    /// * `Ok(Some(Identity))` - Subject exists
    /// * `Ok(None)` - Subject is unknown (deleted, disabled)
    /// * `Err(DomainError)` - Lookup failed
    async fn find_identity(&self, subject_id: &str) -> Result<Option<Identity>, DomainError>;
}
