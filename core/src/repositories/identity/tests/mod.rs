use crate::domain::entities::Identity;
use crate::repositories::identity::{IdentityProvider, InMemoryIdentityProvider};

#[tokio::test]
async fn test_upsert_and_find() {
    let provider = InMemoryIdentityProvider::new();
    provider
        .upsert(Identity::new("user123", "test@example.com", ["user"]))
        .await;

    let found = provider.find_identity("user123").await.unwrap().unwrap();
    assert_eq!(found.email, "test@example.com");
    assert!(provider.find_identity("ghost").await.unwrap().is_none());
}

#[tokio::test]
async fn test_upsert_replaces_roles() {
    let provider = InMemoryIdentityProvider::new();
    provider
        .upsert(Identity::new("user123", "test@example.com", ["user"]))
        .await;
    provider
        .upsert(Identity::new("user123", "test@example.com", ["user", "admin"]))
        .await;

    let found = provider.find_identity("user123").await.unwrap().unwrap();
    assert!(found.has_role("admin"));
}

#[tokio::test]
async fn test_remove() {
    let provider = InMemoryIdentityProvider::new();
    provider
        .upsert(Identity::new("user123", "test@example.com", ["user"]))
        .await;

    assert!(provider.remove("user123").await);
    assert!(!provider.remove("user123").await);
    assert!(provider.find_identity("user123").await.unwrap().is_none());
}
