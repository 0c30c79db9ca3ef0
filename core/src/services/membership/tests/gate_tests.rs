//! Tests for the membership gate

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Membership, Organization};
use crate::domain::value_objects::{ListQuery, Page};
use crate::errors::DomainError;
use crate::repositories::{MemoryStore, OrganizationRepository};
use crate::services::membership::MembershipGate;

struct BrokenRepository;

#[async_trait]
impl OrganizationRepository for BrokenRepository {
    async fn create_with_member(&self, _: &Organization, _: &Membership) -> Result<Organization, DomainError> {
        Err(DomainError::persistence("down"))
    }

    async fn find_by_id(&self, _: Uuid) -> Result<Option<Organization>, DomainError> {
        Err(DomainError::persistence("down"))
    }

    async fn list_for_user(&self, _: Uuid, _: &ListQuery) -> Result<Page<Organization>, DomainError> {
        Err(DomainError::persistence("down"))
    }

    async fn update(&self, _: &Organization) -> Result<bool, DomainError> {
        Err(DomainError::persistence("down"))
    }

    async fn delete(&self, _: Uuid) -> Result<bool, DomainError> {
        Err(DomainError::persistence("down"))
    }

    async fn is_member(&self, _: Uuid, _: Uuid) -> Result<bool, DomainError> {
        Err(DomainError::persistence("down"))
    }
}

#[tokio::test]
async fn test_never_joined_user_is_not_member() {
    let store = MemoryStore::new();
    let gate = MembershipGate::new(Arc::new(store.clone()));
    let owner = Uuid::new_v4();
    let org = Organization::new("Acme", "", owner, Utc::now());
    store
        .create_with_member(&org, &Membership::new(owner, org.id, Utc::now()))
        .await
        .unwrap();

    assert!(gate.check_membership(owner, org.id).await.unwrap());
    assert!(!gate.check_membership(Uuid::new_v4(), org.id).await.unwrap());
    assert!(!gate.check_membership(owner, Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn test_authorize_maps_non_member_to_forbidden() {
    let gate = MembershipGate::new(Arc::new(MemoryStore::new()));
    let err = gate.authorize(Uuid::new_v4(), Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden));
}

#[tokio::test]
async fn test_datastore_failure_fails_closed() {
    let gate = MembershipGate::new(Arc::new(BrokenRepository));

    let err = gate.check_membership(Uuid::new_v4(), Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::Persistence { .. }));

    let err = gate.authorize(Uuid::new_v4(), Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::Persistence { .. }));
}
