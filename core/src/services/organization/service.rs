//! Organization use cases

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::entities::{Membership, Organization};
use crate::domain::value_objects::{ListQuery, Page};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::OrganizationRepository;

/// Creates, lists and edits organizations
///
/// Access control happens before these calls, in the membership gate.
pub struct OrganizationService {
    repository: Arc<dyn OrganizationRepository>,
    clock: Arc<dyn Clock>,
}

impl OrganizationService {
    pub fn new(repository: Arc<dyn OrganizationRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Create an organization and enroll the creator as its first member
    pub async fn create(
        &self,
        creator: Uuid,
        name: &str,
        description: &str,
    ) -> DomainResult<Organization> {
        let now = self.clock.now();
        let organization = Organization::new(name, description, creator, now);
        let membership = Membership::new(creator, organization.id, now);

        let organization = self
            .repository
            .create_with_member(&organization, &membership)
            .await?;
        info!("User {} created organization {}", creator, organization.id);
        Ok(organization)
    }

    /// Organizations the user belongs to
    pub async fn list_for_user(&self, user_id: Uuid, query: &ListQuery) -> DomainResult<Page<Organization>> {
        self.repository.list_for_user(user_id, query).await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Organization> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Organization"))
    }

    /// Replace name and description
    pub async fn update(&self, id: Uuid, name: &str, description: &str) -> DomainResult<Organization> {
        let mut organization = self.get(id).await?;
        organization.name = name.to_string();
        organization.description = description.to_string();
        organization.updated_at = self.clock.now();

        if !self.repository.update(&organization).await? {
            return Err(DomainError::not_found("Organization"));
        }
        Ok(organization)
    }

    /// Delete an organization with its memberships, services and versions
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found("Organization"));
        }
        info!("Deleted organization {}", id);
        Ok(())
    }
}
