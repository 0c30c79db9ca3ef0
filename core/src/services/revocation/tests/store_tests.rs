//! Unit tests for the revocation store

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::{Clock, ManualClock};
use crate::errors::DomainError;
use crate::repositories::MemoryStore;
use crate::services::revocation::RevocationStore;

use super::FailingRepository;

fn setup() -> (RevocationStore, MemoryStore, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()));
    let memory = MemoryStore::new();
    let store = RevocationStore::new(Arc::new(memory.clone()), clock.clone());
    (store, memory, clock)
}

#[tokio::test]
async fn test_record_then_is_revoked() {
    let (store, _memory, clock) = setup();
    store
        .record("fp-1", Uuid::new_v4(), clock.now() + Duration::hours(1))
        .await
        .unwrap();

    assert!(store.is_revoked("fp-1").await);
    assert!(!store.is_revoked("fp-2").await);
}

#[tokio::test]
async fn test_duplicate_record_succeeds() {
    let (store, memory, clock) = setup();
    let user_id = Uuid::new_v4();
    let expires = clock.now() + Duration::hours(1);

    store.record("fp", user_id, expires).await.unwrap();
    store.record("fp", user_id, expires).await.unwrap();

    assert_eq!(memory.revoked_token_count().await, 1);
}

#[tokio::test]
async fn test_record_stops_blocking_after_expiry() {
    let (store, _memory, clock) = setup();
    let expires = clock.now() + Duration::minutes(10);
    store.record("fp", Uuid::new_v4(), expires).await.unwrap();

    clock.set(expires - Duration::seconds(1));
    assert!(store.is_revoked("fp").await);

    clock.set(expires);
    assert!(!store.is_revoked("fp").await);
}

#[tokio::test]
async fn test_revoke_expire_reap() {
    let (store, memory, clock) = setup();
    let expires = clock.now() + Duration::minutes(10);
    store.record("old", Uuid::new_v4(), expires).await.unwrap();
    store
        .record("fresh", Uuid::new_v4(), expires + Duration::hours(1))
        .await
        .unwrap();

    assert_eq!(store.reap().await.unwrap(), 0);

    clock.set(expires);
    assert_eq!(store.reap().await.unwrap(), 1);
    assert_eq!(memory.revoked_token_count().await, 1);
    assert!(!store.is_revoked("old").await);
    assert!(store.is_revoked("fresh").await);
}

#[tokio::test]
async fn test_is_revoked_fails_open() {
    let clock = Arc::new(ManualClock::default());
    let store = RevocationStore::new(Arc::new(FailingRepository::always()), clock);

    assert!(!store.is_revoked("anything").await);
}

#[tokio::test]
async fn test_record_fails_closed() {
    let clock = Arc::new(ManualClock::default());
    let store = RevocationStore::new(Arc::new(FailingRepository::always()), clock.clone());

    let err = store
        .record("fp", Uuid::new_v4(), clock.now() + Duration::hours(1))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Persistence { .. }));
    assert!(store.reap().await.is_err());
}
