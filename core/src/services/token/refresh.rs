//! Refresh coordination: one valid refresh token in, a fresh pair out

use tg_shared::config::RefreshRotationMode;

use crate::domain::entities::{Identity, RefreshClaims, RegisteredClaims, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationRegistry;

use super::service::TokenService;

impl<R: RevocationRegistry> TokenService<R> {
    /// Exchanges a refresh token for a new token pair
    ///
    /// The refresh token goes through the full verification sequence and must
    /// carry the `refresh` token type. The identity of the new pair comes from
    /// the identity provider when one is wired, else from the snapshot in the
    /// refresh token.
    ///
    /// Under [`RefreshRotationMode::SingleUse`] the presented token id is
    /// claimed in the revocation registry before the new pair is signed. Of
    /// two concurrent refreshes with the same token exactly one wins; the
    /// other fails with `TokenRevoked`.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        if !self.issuer.can_sign() {
            return Err(TokenError::Signing {
                message: "private key not loaded".to_string(),
            }
            .into());
        }

        let claims = match self.verifier.verify_refresh(refresh_token).await {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!(reason = %e, "Refresh token rejected");
                return Err(e);
            }
        };

        let identity = self.resolve_identity(&claims).await?;

        if self.config.refresh_rotation == RefreshRotationMode::SingleUse {
            let claimed = self
                .registry
                .revoke_until(&claims.token_id, claims.expiry())
                .await?;
            if !claimed {
                tracing::warn!(
                    token_id = %claims.token_id,
                    subject_id = %claims.subject_id,
                    "Refresh token already used"
                );
                return Err(TokenError::TokenRevoked.into());
            }
        }

        let pair = self.issuer.issue_default(&identity)?;
        tracing::info!(subject_id = %identity.subject_id, "Token pair refreshed");
        Ok(pair)
    }

    async fn resolve_identity(&self, claims: &RefreshClaims) -> Result<Identity, DomainError> {
        let identity = match &self.identity_provider {
            Some(provider) => provider
                .find_identity(&claims.subject_id)
                .await?
                .ok_or_else(|| DomainError::from(TokenError::UnknownSubject))?,
            None => claims.snapshot(),
        };

        identity
            .validate()
            .map_err(|_| TokenError::invalid_claims("no usable identity for subject"))?;
        Ok(identity)
    }
}
