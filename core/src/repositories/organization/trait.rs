//! Organization and membership repository trait

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::organization::{Membership, Organization};
use crate::domain::value_objects::{ListQuery, Page};
use crate::errors::DomainError;

/// Repository trait for organizations and their memberships
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Create an organization and enroll its creator atomically
    ///
    /// # Arguments
    /// * `organization` - The organization to insert
    /// * `membership` - Creator membership, inserted in the same transaction
    async fn create_with_member(
        &self,
        organization: &Organization,
        membership: &Membership,
    ) -> Result<Organization, DomainError>;

    /// Find an organization by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>, DomainError>;

    /// List organizations the user belongs to
    ///
    /// `query.search` matches names case-insensitively as a substring.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        query: &ListQuery,
    ) -> Result<Page<Organization>, DomainError>;

    /// Update name, description and `updated_at`
    ///
    /// # Returns
    /// * `Ok(false)` - No organization with that ID
    async fn update(&self, organization: &Organization) -> Result<bool, DomainError>;

    /// Delete an organization with its memberships, services and versions
    ///
    /// # Returns
    /// * `Ok(false)` - No organization with that ID
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Whether a membership row exists for the pair
    async fn is_member(&self, user_id: Uuid, organization_id: Uuid) -> Result<bool, DomainError>;
}
