//! Identity entity: who a token speaks for.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::TokenError;

/// The subject a token pair is issued to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque subject identifier
    pub subject_id: String,

    /// Contact address carried in the claims
    pub email: String,

    /// Role names granted to the subject
    pub roles: BTreeSet<String>,
}

impl Identity {
    /// Creates a new identity; duplicate roles collapse
    pub fn new<I, S>(subject_id: impl Into<String>, email: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subject_id: subject_id.into(),
            email: email.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Checks that every field is usable in a token
    ///
    /// Blank (empty or whitespace-only) subject or email, an empty role set,
    /// or a blank role name is rejected with [`TokenError::InvalidIdentity`]
    /// naming the offending field.
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.subject_id.trim().is_empty() {
            return Err(invalid("subject_id"));
        }
        if self.email.trim().is_empty() {
            return Err(invalid("email"));
        }
        if self.roles.is_empty() || self.roles.iter().any(|role| role.trim().is_empty()) {
            return Err(invalid("roles"));
        }
        Ok(())
    }

    /// Checks whether the identity holds a role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

fn invalid(field: &str) -> TokenError {
    TokenError::InvalidIdentity {
        field: field.to_string(),
    }
}
