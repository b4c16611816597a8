//! Identity provider backed by an in-process map

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::Identity;
use crate::errors::DomainError;

use super::r#trait::IdentityProvider;

/// In-memory subject directory
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityProvider {
    identities: Arc<RwLock<HashMap<String, Identity>>>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a subject
    pub async fn upsert(&self, identity: Identity) {
        let mut identities = self.identities.write().await;
        identities.insert(identity.subject_id.clone(), identity);
    }

    /// Remove a subject; returns whether it existed
    pub async fn remove(&self, subject_id: &str) -> bool {
        let mut identities = self.identities.write().await;
        identities.remove(subject_id).is_some()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn find_identity(&self, subject_id: &str) -> Result<Option<Identity>, DomainError> {
        let identities = self.identities.read().await;
        Ok(identities.get(subject_id).cloned())
    }
}
