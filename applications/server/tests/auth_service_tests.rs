/// Authentication service tests
/// Tests JWT generation, password hashing, token validation
mod common;

use common::create_test_auth_service;
use vidshare_core::UserId;
use vidshare_server::services::auth::{AuthService, TokenType};

/// Test password hashing produces valid bcrypt hashes
#[test]
fn test_password_hashing() {
    let auth_service = create_test_auth_service();

    let password = "MySecurePassword123!";
    let hash = auth_service.hash_password(password).unwrap();

    // Verify hash format (bcrypt starts with $2b$ or $2a$)
    assert!(hash.starts_with("$2b$") || hash.starts_with("$2a$"));
    assert_eq!(hash.len(), 60);

    // Verify the hash is different each time (salt is random)
    let hash2 = auth_service.hash_password(password).unwrap();
    assert_ne!(hash, hash2, "Hashes should differ due to random salt");
}

/// Test password verification with correct and wrong password
#[test]
fn test_password_verification() {
    let auth_service = create_test_auth_service();

    let hash = auth_service.hash_password("MySecurePassword123!").unwrap();

    assert!(auth_service
        .verify_password("MySecurePassword123!", &hash)
        .unwrap());
    assert!(!auth_service.verify_password("WrongPassword", &hash).unwrap());
}

/// Access token claims carry the user id and token type
#[test]
fn test_access_token_claims() {
    let auth_service = create_test_auth_service();
    let user_id = UserId::generate();

    let token = auth_service.create_access_token(&user_id).unwrap();
    let claims = auth_service.verify_token(&token).unwrap();

    assert_eq!(claims.sub, user_id.as_str());
    assert_eq!(claims.token_type, TokenType::Access);
    assert_eq!(claims.exp - claims.iat, 3600);
}

/// Tokens signed with another secret are rejected
#[test]
fn test_token_from_other_secret_rejected() {
    let auth_service = create_test_auth_service();
    let other = AuthService::new("another-secret".to_string(), 1, 1);
    let user_id = UserId::generate();

    let token = other.create_access_token(&user_id).unwrap();
    assert!(auth_service.verify_access_token(&token).is_err());
}

/// Test token type validation
#[test]
fn test_token_type_validation() {
    let auth_service = create_test_auth_service();
    let user_id = UserId::generate();

    let access_token = auth_service.create_access_token(&user_id).unwrap();
    assert!(auth_service.verify_refresh_token(&access_token).is_err());

    let refresh_token = auth_service.create_refresh_token(&user_id).unwrap();
    assert!(auth_service.verify_access_token(&refresh_token).is_err());
    assert_eq!(
        auth_service.verify_refresh_token(&refresh_token).unwrap(),
        user_id
    );
}
