//! Unit tests for the authentication service

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

use crate::clock::ManualClock;
use crate::errors::{DomainError, TokenError};
use crate::repositories::MemoryStore;
use crate::services::auth::{AuthService, AuthServiceConfig, INVALID_CREDENTIALS_MESSAGE};
use crate::services::revocation::RevocationStore;
use crate::services::token::{TokenService, TokenServiceConfig};

struct Harness {
    auth: AuthService,
    clock: Arc<ManualClock>,
    store: MemoryStore,
}

fn setup() -> Harness {
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()));
    let store = MemoryStore::new();
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::new("secret"), clock.clone()));
    let revocations = Arc::new(RevocationStore::new(Arc::new(store.clone()), clock.clone()));
    let auth = AuthService::new(
        Arc::new(store.clone()),
        tokens,
        revocations,
        clock.clone(),
        AuthServiceConfig { bcrypt_cost: 4 },
    );
    Harness { auth, clock, store }
}

#[tokio::test]
async fn test_register_hashes_password() {
    let h = setup();
    let user = h.auth.register("User@Example.com", "User", "Passw0rd!").await.unwrap();

    assert_eq!(user.email, "user@example.com");
    assert_ne!(user.password_hash, "Passw0rd!");
    assert!(bcrypt::verify("Passw0rd!", &user.password_hash).unwrap());
}

#[tokio::test]
async fn test_register_duplicate_email_is_conflict() {
    let h = setup();
    h.auth.register("a@b.com", "A", "Passw0rd!").await.unwrap();

    let err = h.auth.register("A@B.com", "B", "Passw0rd!").await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));
}

#[tokio::test]
async fn test_login_rejects_bad_credentials_uniformly() {
    let h = setup();
    h.auth.register("a@b.com", "A", "Passw0rd!").await.unwrap();

    for (email, password) in [("a@b.com", "Wrong-pass1"), ("nobody@b.com", "Passw0rd!")] {
        match h.auth.login(email, password).await {
            Err(DomainError::Unauthorized { message }) => assert_eq!(message, INVALID_CREDENTIALS_MESSAGE),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}

#[tokio::test]
async fn test_login_then_authenticate() {
    let h = setup();
    let user = h.auth.register("a@b.com", "A", "Passw0rd!").await.unwrap();

    let token = h.auth.login("a@b.com", "Passw0rd!").await.unwrap();
    let claims = h.auth.authenticate(&token).await.unwrap();
    assert_eq!(claims.user_uuid(), Some(user.id));
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let h = setup();
    h.auth.register("a@b.com", "A", "Passw0rd!").await.unwrap();
    let token = h.auth.login("a@b.com", "Passw0rd!").await.unwrap();

    h.auth.logout(&token).await.unwrap();
    assert_eq!(h.auth.authenticate(&token).await.unwrap_err(), TokenError::InvalidToken);

    // A second logout with the same token is a no-op
    h.auth.logout(&token).await.unwrap();
    assert_eq!(h.store.revoked_token_count().await, 1);
}

#[tokio::test]
async fn test_logout_accepts_expired_token() {
    let h = setup();
    h.auth.register("a@b.com", "A", "Passw0rd!").await.unwrap();
    let token = h.auth.login("a@b.com", "Passw0rd!").await.unwrap();

    h.clock.advance(Duration::hours(2));
    h.auth.logout(&token).await.unwrap();
}

#[tokio::test]
async fn test_logout_rejects_forged_token() {
    let h = setup();
    let err = h.auth.logout("garbage").await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidToken)));
}
