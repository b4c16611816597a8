//! Process-local revocation registry

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::RevocationError;

use super::r#trait::RevocationRegistry;

/// Revocation registry backed by an in-process set
///
/// Entries are never evicted and are lost on restart. Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRevocationRegistry {
    revoked: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryRevocationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of revoked ids
    pub async fn len(&self) -> usize {
        self.revoked.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.revoked.read().await.is_empty()
    }
}

#[async_trait]
impl RevocationRegistry for InMemoryRevocationRegistry {
    async fn revoke(&self, token_id: &str) -> Result<bool, RevocationError> {
        let mut revoked = self.revoked.write().await;
        Ok(revoked.insert(token_id.to_string()))
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, RevocationError> {
        let revoked = self.revoked.read().await;
        Ok(revoked.contains(token_id))
    }
}
