//! Service version repository trait

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::service::ServiceVersion;
use crate::domain::value_objects::{ListQuery, Page};
use crate::errors::DomainError;

/// Repository trait for versions of a single service
#[async_trait]
pub trait ServiceVersionRepository: Send + Sync {
    /// Persist a new version
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - The service already has this version string
    async fn create(&self, version: &ServiceVersion) -> Result<ServiceVersion, DomainError>;

    async fn find_by_id(
        &self,
        service_id: Uuid,
        id: Uuid,
    ) -> Result<Option<ServiceVersion>, DomainError>;

    /// List versions, `query.search` matching as a version prefix
    async fn list(
        &self,
        service_id: Uuid,
        query: &ListQuery,
    ) -> Result<Page<ServiceVersion>, DomainError>;

    /// Update description, release timestamp and `updated_at`
    async fn update(&self, version: &ServiceVersion) -> Result<bool, DomainError>;

    async fn delete(&self, service_id: Uuid, id: Uuid) -> Result<bool, DomainError>;
}
