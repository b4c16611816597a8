//! Tests for the token service as a whole

use std::sync::Arc;

use chrono::Duration;
use tg_shared::config::{ConfigError, JwtConfig};

use crate::domain::entities::{AccessClaims, Identity, RefreshClaims};
use crate::errors::TokenError;
use crate::repositories::InMemoryRevocationRegistry;
use crate::services::token::{RsaKeyPair, TokenAuthority, TokenService, TokenServiceConfig};
use crate::testing::{test_identity, test_service, OTHER_PRIVATE_KEY_PEM, OTHER_PUBLIC_KEY_PEM};

use super::expect_token_error;

#[tokio::test]
async fn test_issue_and_verify_scenario() {
    let service = test_service();
    let identity = Identity::new("user123", "test@example.com", ["user", "admin"]);

    let pair = service
        .issue(&identity, Duration::minutes(15), Duration::minutes(15) * 24)
        .unwrap();
    assert_eq!(pair.expires_in, 900);

    let claims = service.verify(&pair.access_token).await.unwrap();
    assert_eq!(claims.subject_id, "user123");
    assert_eq!(claims.email, "test@example.com");
    assert!(claims.has_role("user"));
    assert!(claims.has_role("admin"));
}

#[tokio::test]
async fn test_revoke_by_id() {
    let service = test_service();
    let pair = service.issue_default(&test_identity()).unwrap();
    let claims: AccessClaims = service.verifier().inspect(&pair.access_token).unwrap();

    service.revoke_id(&claims.token_id).await.unwrap();

    assert!(service.is_revoked(&claims.token_id).await.unwrap());
    let error = expect_token_error(service.verify(&pair.access_token).await);
    assert_eq!(error, TokenError::TokenRevoked);
}

#[tokio::test]
async fn test_revoke_is_idempotent() {
    let service = test_service();
    let pair = service.issue_default(&test_identity()).unwrap();

    assert!(service.revoke(&pair.access_token).await.is_ok());
    assert!(service.revoke(&pair.access_token).await.is_ok());
    assert_eq!(service.registry().len().await, 1);
}

#[tokio::test]
async fn test_revoke_expired_token() {
    let service = test_service();
    let pair = service
        .issue(&test_identity(), Duration::seconds(-1), Duration::seconds(-1))
        .unwrap();

    assert!(service.revoke(&pair.access_token).await.is_ok());
    assert!(service.revoke(&pair.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_revoke_requires_valid_signature() {
    let service = test_service();

    let error = expect_token_error(service.revoke("garbage").await);
    assert_eq!(error, TokenError::MalformedToken);

    let foreign_keys =
        RsaKeyPair::from_pem(OTHER_PRIVATE_KEY_PEM.as_bytes(), OTHER_PUBLIC_KEY_PEM.as_bytes())
            .unwrap();
    let foreign = TokenService::new(
        foreign_keys,
        InMemoryRevocationRegistry::new(),
        TokenServiceConfig::default(),
    );
    let pair = foreign.issue_default(&test_identity()).unwrap();

    let error = expect_token_error(service.revoke(&pair.access_token).await);
    assert_eq!(error, TokenError::InvalidSignature);
    assert!(service.registry().is_empty().await);
}

#[tokio::test]
async fn test_is_expired() {
    let service = test_service();
    let fresh = service.issue_default(&test_identity()).unwrap();
    let stale = service
        .issue(&test_identity(), Duration::seconds(-1), Duration::hours(1))
        .unwrap();

    assert!(!service.is_expired(&fresh.access_token));
    assert!(!service.is_expired(&fresh.refresh_token));
    assert!(service.is_expired(&stale.access_token));
    assert!(service.is_expired("garbage"));
}

#[tokio::test]
async fn test_inspect_reads_refresh_claims() {
    let service = test_service();
    let pair = service.issue_default(&test_identity()).unwrap();

    let claims: RefreshClaims = service.verifier().inspect(&pair.refresh_token).unwrap();
    assert_eq!(claims.token_type, "refresh");
    assert_eq!(claims.snapshot(), test_identity());
}

#[test]
fn test_config_from_jwt_config() {
    let config = TokenServiceConfig::try_from(&JwtConfig::default()).unwrap();

    assert_eq!(config.access_token_ttl, Duration::minutes(15));
    assert_eq!(config.refresh_token_ttl, Duration::days(7));
    assert_eq!(config.clock_skew, Duration::seconds(60));
    assert_eq!(config.issuer, "afrikpay-gateway");
}

#[test]
fn test_config_from_out_of_range_jwt_config_is_an_error() {
    let config = JwtConfig {
        refresh_token_expiry: i64::MAX,
        ..Default::default()
    };
    assert!(matches!(
        TokenServiceConfig::try_from(&config),
        Err(ConfigError::Invalid { .. })
    ));
}

#[test]
fn test_default_refresh_ttl_is_multiple_of_access() {
    let config = TokenServiceConfig::default();
    assert_eq!(config.refresh_token_ttl, config.access_token_ttl * 24);
}

#[test]
fn test_huge_access_ttl_saturates_refresh_ttl() {
    let config = TokenServiceConfig::new("iss", "aud", Duration::MAX);
    assert_eq!(config.refresh_token_ttl, Duration::MAX);
}

#[tokio::test]
async fn test_service_behind_trait_object() {
    let authority: Arc<dyn TokenAuthority> = Arc::new(test_service());

    let pair = authority.issue_default(&test_identity()).unwrap();
    let claims = authority.verify(&pair.access_token).await.unwrap();
    assert_eq!(claims.subject_id, "user123");

    let refreshed = authority.refresh(&pair.refresh_token).await.unwrap();
    authority.revoke(&refreshed.access_token).await.unwrap();
    assert!(authority.verify(&refreshed.access_token).await.is_err());
}
