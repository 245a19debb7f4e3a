//! Registration flow tests: key gate and cross-entity uniqueness.

use super::helpers::*;
use crate::errors::IdentityCoreError;
use crate::traits::IdentityDirectory;
use crate::types::KeyRejection;

#[tokio::test]
async fn test_register_user_persists_record() {
    let (service, _clock, _temp_dir) = create_test_service();

    let user = service
        .register_user("New User".to_string(), "new@test.com".to_string(), "validpass123")
        .await
        .unwrap();

    assert_eq!(user.name, "New User");
    assert_eq!(user.email, "new@test.com");
    assert_eq!(user.created_at, T0);

    let stored = service.get_user("new@test.com").await.unwrap();
    assert_eq!(stored.id, user.id);
    assert_eq!(stored.name, "New User");
}

#[tokio::test]
async fn test_password_is_hashed_not_stored_raw() {
    let (service, _clock, _temp_dir) = create_test_service();

    let user = service
        .register_user("Carol".to_string(), "carol@x.com".to_string(), "pw")
        .await
        .unwrap();

    assert!(user.password_hash.starts_with("$argon2id$"));
    assert_ne!(user.password_hash, "pw");
    pfm_crypto::verify_password(b"pw", &user.password_hash).unwrap();
}

#[tokio::test]
async fn test_duplicate_user_registration_conflicts() {
    let (service, _clock, _temp_dir) = create_test_service();

    service
        .register_user("Carol".to_string(), "carol@x.com".to_string(), "pw")
        .await
        .unwrap();

    let result = service
        .register_user("Other Carol".to_string(), "carol@x.com".to_string(), "pw2")
        .await;
    assert!(matches!(
        result,
        Err(IdentityCoreError::EmailAlreadyInUse(email)) if email == "carol@x.com"
    ));

    // Exactly one record survives.
    let users = service.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Carol");
}

#[tokio::test]
async fn test_admin_email_blocked_by_user_account() {
    let (service, _clock, _temp_dir) = create_test_service();

    service
        .register_user("Existing User".to_string(), "user@test.com".to_string(), "user123")
        .await
        .unwrap();

    service
        .issue_registration_key("KEY".to_string(), 30)
        .await
        .unwrap();

    let result = service
        .register_admin(
            "New Admin".to_string(),
            "user@test.com".to_string(),
            "admin123",
            Some("KEY"),
        )
        .await;

    // Reported as the uniqueness conflict, not as a key error.
    assert!(matches!(
        result,
        Err(IdentityCoreError::EmailAlreadyInUse(_))
    ));
}

#[tokio::test]
async fn test_user_email_blocked_by_admin_account() {
    let (service, _clock, _temp_dir) = create_test_service();

    service
        .issue_registration_key("KEY".to_string(), 30)
        .await
        .unwrap();
    service
        .register_admin(
            "Existing Admin".to_string(),
            "admin@test.com".to_string(),
            "admin123",
            Some("KEY"),
        )
        .await
        .unwrap();

    let result = service
        .register_user("New User".to_string(), "admin@test.com".to_string(), "pw")
        .await;
    assert!(matches!(
        result,
        Err(IdentityCoreError::EmailAlreadyInUse(_))
    ));
}

#[tokio::test]
async fn test_email_in_use_sees_both_collections() {
    let (service, _clock, _temp_dir) = create_test_service();

    service
        .register_user("U".to_string(), "u@x.com".to_string(), "pw")
        .await
        .unwrap();
    service
        .issue_registration_key("KEY".to_string(), 30)
        .await
        .unwrap();
    service
        .register_admin("A".to_string(), "a@x.com".to_string(), "pw", Some("KEY"))
        .await
        .unwrap();

    assert!(service.email_in_use("u@x.com").await.unwrap());
    assert!(service.email_in_use("a@x.com").await.unwrap());
    assert!(!service.email_in_use("nobody@x.com").await.unwrap());
}

#[tokio::test]
async fn test_admin_registration_mid_ttl_then_duplicate() {
    let (service, clock, _temp_dir) = create_test_service();

    // Key "ABC123" with a 30 minute TTL, presented 10 minutes in.
    service
        .issue_registration_key("ABC123".to_string(), 30)
        .await
        .unwrap();
    clock.advance_minutes(10);

    let alice = service
        .register_admin(
            "Alice".to_string(),
            "alice@x.com".to_string(),
            "pw",
            Some("ABC123"),
        )
        .await
        .unwrap();
    assert_eq!(alice.email, "alice@x.com");

    // Same valid key, same email: the conflict wins over the key gate's Ok.
    let result = service
        .register_admin(
            "Bob".to_string(),
            "alice@x.com".to_string(),
            "pw",
            Some("ABC123"),
        )
        .await;
    assert!(matches!(
        result,
        Err(IdentityCoreError::EmailAlreadyInUse(_))
    ));

    let admins = service.list_admins().await.unwrap();
    assert_eq!(admins.len(), 1);
}

#[tokio::test]
async fn test_admin_registration_without_any_key_issued() {
    let (service, _clock, _temp_dir) = create_test_service();

    let result = service
        .register_admin(
            "Admin".to_string(),
            "admin@x.com".to_string(),
            "pw",
            Some("anything"),
        )
        .await;
    assert!(matches!(
        result,
        Err(IdentityCoreError::KeyRejected(KeyRejection::NoKeyIssued))
    ));
}

#[tokio::test]
async fn test_admin_registration_with_expired_key() {
    let (service, clock, _temp_dir) = create_test_service();

    service
        .issue_registration_key("ABC123".to_string(), 30)
        .await
        .unwrap();
    clock.advance_minutes(31);

    let result = service
        .register_admin(
            "Admin".to_string(),
            "admin@x.com".to_string(),
            "pw",
            Some("ABC123"),
        )
        .await;
    assert!(matches!(
        result,
        Err(IdentityCoreError::KeyRejected(KeyRejection::Expired))
    ));
}

#[tokio::test]
async fn test_admin_registration_with_wrong_key() {
    let (service, _clock, _temp_dir) = create_test_service();

    service
        .issue_registration_key("ABC123".to_string(), 30)
        .await
        .unwrap();

    let result = service
        .register_admin(
            "Admin".to_string(),
            "admin@x.com".to_string(),
            "pw",
            Some("XYZ789"),
        )
        .await;
    assert!(matches!(
        result,
        Err(IdentityCoreError::KeyRejected(KeyRejection::Mismatch))
    ));
}

#[tokio::test]
async fn test_admin_registration_with_missing_key_field() {
    let (service, _clock, _temp_dir) = create_test_service();

    service
        .issue_registration_key("ABC123".to_string(), 30)
        .await
        .unwrap();

    // An absent key never equals an issued one.
    let result = service
        .register_admin("Admin".to_string(), "admin@x.com".to_string(), "pw", None)
        .await;
    assert!(matches!(
        result,
        Err(IdentityCoreError::KeyRejected(KeyRejection::Mismatch))
    ));
}

#[tokio::test]
async fn test_open_gate_service_skips_key_check() {
    let (service, _clock, _temp_dir) = create_open_service();

    let admin = service
        .register_admin("Admin".to_string(), "admin@x.com".to_string(), "pw", None)
        .await
        .unwrap();
    assert_eq!(admin.email, "admin@x.com");
}

#[tokio::test]
async fn test_email_comparison_is_case_sensitive() {
    let (service, _clock, _temp_dir) = create_test_service();

    // The store compares emails as exact bytes and does not normalize case,
    // so these are two distinct identities.
    service
        .register_user("Carol".to_string(), "Carol@x.com".to_string(), "pw")
        .await
        .unwrap();
    service
        .register_user("carol".to_string(), "carol@x.com".to_string(), "pw")
        .await
        .unwrap();

    assert!(!service.email_in_use("CAROL@X.COM").await.unwrap());
    assert_eq!(service.list_users().await.unwrap().len(), 2);
}
