//! Role-based access check

use std::collections::BTreeSet;

use crate::domain::entities::AccessClaims;
use crate::errors::AuthError;

/// Admits claims holding at least one of the required roles
///
/// An empty requirement admits every authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoleGate {
    required: BTreeSet<String>,
}

impl RoleGate {
    pub fn any_of<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn required(&self) -> &BTreeSet<String> {
        &self.required
    }

    /// Checks the claims against the requirement
    pub fn check(&self, claims: &AccessClaims) -> Result<(), AuthError> {
        if self.required.is_empty() || claims.has_any_role(&self.required) {
            return Ok(());
        }

        tracing::warn!(
            subject_id = %claims.subject_id,
            required = ?self.required,
            "Insufficient permissions"
        );
        Err(AuthError::InsufficientPermissions)
    }
}

/// One-shot form of [`RoleGate::check`]
pub fn require_any_role<S: AsRef<str>>(claims: &AccessClaims, roles: &[S]) -> Result<(), AuthError> {
    RoleGate::any_of(roles.iter().map(|role| role.as_ref().to_string())).check(claims)
}
