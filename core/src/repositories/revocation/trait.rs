//! Revocation registry trait: the set of token ids that must no longer be honored.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::RevocationError;

/// Repository trait for revoked token ids
///
/// Revocation is permanent for the lifetime of the store: once an id has been
/// recorded, every later `is_revoked` for it returns `true`. Implementations
/// must be safe for concurrent use.
///
/// # Failure Semantics
/// A store that cannot answer returns [`RevocationError`]. Callers treat that
/// as "cannot verify" and reject the request; it is never read as
/// "not revoked".
#[async_trait]
pub trait RevocationRegistry: Send + Sync {
    /// Record a token id as revoked
    ///
    /// # Returns
    /// * `Ok(true)` - The id was newly recorded by this call
    /// * `Ok(false)` - The id was already revoked (the call is still a success)
    /// * `Err(RevocationError)` - The store could not be written
    ///
    /// # Example
    /// ```no_run
    /// # use tg_core::repositories::{RevocationRegistry, InMemoryRevocationRegistry};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let registry = InMemoryRevocationRegistry::new();
    /// assert!(registry.revoke("token-id").await?);
    /// assert!(!registry.revoke("token-id").await?);
    /// assert!(registry.is_revoked("token-id").await?);
    /// # Ok(())
    /// # }
    /// ```
    async fn revoke(&self, token_id: &str) -> Result<bool, RevocationError>;

    /// Record a token id as revoked, knowing when the token expires
    ///
    /// Stores that can expire entries use `expires_at` to forget the id once
    /// the token could no longer pass the expiry check anyway. The default
    /// keeps the id forever.
    async fn revoke_until(
        &self,
        token_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, RevocationError> {
        let _ = expires_at;
        self.revoke(token_id).await
    }

    /// Check whether a token id has been revoked
    async fn is_revoked(&self, token_id: &str) -> Result<bool, RevocationError>;
}
