//! Startup wiring: keys, revocation store and token service

use std::sync::Arc;

use anyhow::Context;

use tg_core::repositories::InMemoryRevocationRegistry;
use tg_core::services::{RsaKeyPair, TokenAuthority, TokenService, TokenServiceConfig};
use tg_infra::cache::RedisRevocationRegistry;
use tg_shared::config::{AppConfig, RevocationBackend};

/// Loads and probes the key pair
///
/// Any failure here must stop the process: a service that cannot sign or
/// verify has nothing to serve.
pub fn load_keys(config: &AppConfig) -> anyhow::Result<RsaKeyPair> {
    let keys = RsaKeyPair::from_files(&config.jwt.private_key_path, &config.jwt.public_key_path)
        .context("failed to load the JWT key pair")?;
    keys.probe()
        .context("JWT private and public keys do not form a pair")?;

    tracing::info!(
        private_key_path = %config.jwt.private_key_path,
        public_key_path = %config.jwt.public_key_path,
        "JWT key pair loaded"
    );
    Ok(keys)
}

/// Builds the token authority selected by the configuration
pub async fn build_authority(config: &AppConfig) -> anyhow::Result<Arc<dyn TokenAuthority>> {
    let keys = load_keys(config)?;
    let token_config =
        TokenServiceConfig::try_from(&config.jwt).context("invalid JWT configuration")?;

    let authority: Arc<dyn TokenAuthority> = match config.revocation_backend {
        RevocationBackend::Memory => {
            tracing::warn!("Using the in-memory revocation store; revocations are lost on restart");
            Arc::new(TokenService::new(keys, InMemoryRevocationRegistry::new(), token_config))
        }
        RevocationBackend::Redis => {
            let registry = RedisRevocationRegistry::connect(config.cache.clone())
                .await
                .context("failed to connect to the Redis revocation store")?;
            tracing::info!("Using the Redis revocation store");
            Arc::new(TokenService::new(keys, registry, token_config))
        }
    };
    Ok(authority)
}
