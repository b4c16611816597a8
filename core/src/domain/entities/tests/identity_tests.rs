use crate::domain::entities::Identity;
use crate::errors::TokenError;

fn field_of(result: Result<(), TokenError>) -> String {
    match result {
        Err(TokenError::InvalidIdentity { field }) => field,
        other => panic!("expected InvalidIdentity, got {:?}", other),
    }
}

#[test]
fn test_valid_identity() {
    let identity = Identity::new("user123", "test@example.com", ["user", "admin"]);
    assert!(identity.validate().is_ok());
    assert!(identity.has_role("admin"));
    assert!(!identity.has_role("auditor"));
}

#[test]
fn test_duplicate_roles_collapse() {
    let identity = Identity::new("user123", "test@example.com", ["user", "user"]);
    assert_eq!(identity.roles.len(), 1);
}

#[test]
fn test_blank_fields_are_named() {
    assert_eq!(field_of(Identity::new("", "a@b.c", ["user"]).validate()), "subject_id");
    assert_eq!(field_of(Identity::new("   ", "a@b.c", ["user"]).validate()), "subject_id");
    assert_eq!(field_of(Identity::new("u1", " \t", ["user"]).validate()), "email");
    assert_eq!(field_of(Identity::new("u1", "a@b.c", Vec::<String>::new()).validate()), "roles");
    assert_eq!(field_of(Identity::new("u1", "a@b.c", ["user", " "]).validate()), "roles");
}
