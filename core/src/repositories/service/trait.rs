//! Service repository trait

use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::entities::service::Service;
use crate::domain::value_objects::{ListQuery, Page};
use crate::errors::DomainError;

/// Repository trait for services scoped to an organization
///
/// Every lookup takes the owning organization so a service is never
/// reachable through another organization's routes.
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, service: &Service) -> Result<Service, DomainError>;

    async fn find_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Service>, DomainError>;

    /// List services of an organization, `query.search` matching names
    async fn list(
        &self,
        organization_id: Uuid,
        query: &ListQuery,
    ) -> Result<Page<Service>, DomainError>;

    /// Update name, description and `updated_at`
    async fn update(&self, service: &Service) -> Result<bool, DomainError>;

    /// Delete a service and its versions
    async fn delete(&self, organization_id: Uuid, id: Uuid) -> Result<bool, DomainError>;

    /// Number of versions per service. Services without versions map to 0.
    async fn count_versions(&self, service_ids: &[Uuid]) -> Result<HashMap<Uuid, i64>, DomainError>;
}
