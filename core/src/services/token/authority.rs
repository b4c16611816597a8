//! Object-safe facade over the token service

use async_trait::async_trait;
use chrono::Duration;

use crate::domain::entities::{AccessClaims, Identity, TokenPair};
use crate::errors::DomainError;
use crate::repositories::RevocationRegistry;

use super::service::TokenService;

/// Token operations as seen by request handlers and middleware
///
/// Lets the HTTP layer hold an `Arc<dyn TokenAuthority>` regardless of which
/// revocation store backs the service.
#[async_trait]
pub trait TokenAuthority: Send + Sync {
    fn issue(
        &self,
        identity: &Identity,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<TokenPair, DomainError>;

    fn issue_default(&self, identity: &Identity) -> Result<TokenPair, DomainError>;

    async fn verify(&self, token: &str) -> Result<AccessClaims, DomainError>;

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError>;

    /// Revoke the token carried in `token`
    async fn revoke(&self, token: &str) -> Result<(), DomainError>;

    /// Revoke a token by id
    async fn revoke_id(&self, token_id: &str) -> Result<(), DomainError>;
}

#[async_trait]
impl<R: RevocationRegistry + 'static> TokenAuthority for TokenService<R> {
    fn issue(
        &self,
        identity: &Identity,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<TokenPair, DomainError> {
        TokenService::issue(self, identity, access_ttl, refresh_ttl)
    }

    fn issue_default(&self, identity: &Identity) -> Result<TokenPair, DomainError> {
        TokenService::issue_default(self, identity)
    }

    async fn verify(&self, token: &str) -> Result<AccessClaims, DomainError> {
        TokenService::verify(self, token).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        TokenService::refresh(self, refresh_token).await
    }

    async fn revoke(&self, token: &str) -> Result<(), DomainError> {
        TokenService::revoke(self, token).await
    }

    async fn revoke_id(&self, token_id: &str) -> Result<(), DomainError> {
        TokenService::revoke_id(self, token_id).await
    }
}
