//! Organization membership gate
//!
//! Every org-scoped operation passes through [`MembershipGate`]. Membership
//! is binary: the row exists or it does not.

use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::errors::DomainError;
use crate::repositories::OrganizationRepository;

#[cfg(test)]
mod tests;

/// Checks that a user belongs to an organization
pub struct MembershipGate {
    repository: Arc<dyn OrganizationRepository>,
}

impl MembershipGate {
    pub fn new(repository: Arc<dyn OrganizationRepository>) -> Self {
        Self { repository }
    }

    /// Whether the membership row exists
    ///
    /// # Returns
    /// * `Ok(true)` - The user is a member
    /// * `Ok(false)` - Not a member, or the organization does not exist
    /// * `Err(DomainError)` - Datastore failure; callers must deny
    pub async fn check_membership(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> Result<bool, DomainError> {
        self.repository.is_member(user_id, organization_id).await
    }

    /// Like [`check_membership`](Self::check_membership), but a non-member
    /// becomes `DomainError::Forbidden`
    pub async fn authorize(&self, user_id: Uuid, organization_id: Uuid) -> Result<(), DomainError> {
        if self.check_membership(user_id, organization_id).await? {
            Ok(())
        } else {
            warn!(
                "User {} denied access to organization {}",
                user_id, organization_id
            );
            Err(DomainError::Forbidden)
        }
    }
}
