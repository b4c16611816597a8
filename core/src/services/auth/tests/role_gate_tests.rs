//! Tests for role gating

use crate::domain::entities::Identity;
use crate::errors::AuthError;
use crate::services::auth::{require_any_role, RoleGate};
use crate::testing::access_claims_for;

#[test]
fn test_gate_admits_matching_role() {
    let claims = access_claims_for(&Identity::new("u1", "u1@example.com", ["user", "admin"]));
    assert!(RoleGate::any_of(["admin"]).check(&claims).is_ok());
    assert!(RoleGate::any_of(["auditor", "admin"]).check(&claims).is_ok());
}

#[test]
fn test_gate_refuses_without_intersection() {
    let claims = access_claims_for(&Identity::new("u1", "u1@example.com", ["user"]));
    assert_eq!(
        RoleGate::any_of(["admin"]).check(&claims),
        Err(AuthError::InsufficientPermissions)
    );
}

#[test]
fn test_empty_gate_admits_everyone() {
    let claims = access_claims_for(&Identity::new("u1", "u1@example.com", ["user"]));
    assert!(RoleGate::default().check(&claims).is_ok());
    assert!(RoleGate::any_of(Vec::<String>::new()).check(&claims).is_ok());
}

#[test]
fn test_require_any_role() {
    let claims = access_claims_for(&Identity::new("u1", "u1@example.com", ["user"]));
    assert!(require_any_role(&claims, &["user"]).is_ok());
    assert!(require_any_role(&claims, &["admin", "auditor"]).is_err());
}
