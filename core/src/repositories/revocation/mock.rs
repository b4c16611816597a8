//! Registry doubles for exercising failure paths

use async_trait::async_trait;

use crate::errors::RevocationError;

use super::r#trait::RevocationRegistry;

/// A registry whose store is always down
#[derive(Debug, Clone)]
pub struct UnavailableRevocationRegistry {
    message: String,
}

impl UnavailableRevocationRegistry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn error(&self) -> RevocationError {
        RevocationError::Store {
            message: self.message.clone(),
        }
    }
}

impl Default for UnavailableRevocationRegistry {
    fn default() -> Self {
        Self::new("connection refused")
    }
}

#[async_trait]
impl RevocationRegistry for UnavailableRevocationRegistry {
    async fn revoke(&self, _token_id: &str) -> Result<bool, RevocationError> {
        Err(self.error())
    }

    async fn is_revoked(&self, _token_id: &str) -> Result<bool, RevocationError> {
        Err(self.error())
    }
}
