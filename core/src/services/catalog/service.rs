//! Service and service version use cases

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use kn_shared::validation::is_semver;

use crate::clock::Clock;
use crate::domain::entities::{Service, ServiceVersion};
use crate::domain::value_objects::{ListQuery, Page};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ServiceRepository, ServiceVersionRepository};

/// Optional fields of a version patch
#[derive(Debug, Clone, Default)]
pub struct VersionUpdate {
    pub description: Option<String>,
    pub release_timestamp: Option<DateTime<Utc>>,
}

/// Manages services and service versions inside one organization
///
/// Every call takes the organization ID so that IDs from another
/// organization resolve to "not found".
pub struct CatalogService {
    services: Arc<dyn ServiceRepository>,
    versions: Arc<dyn ServiceVersionRepository>,
    clock: Arc<dyn Clock>,
}

impl CatalogService {
    pub fn new(
        services: Arc<dyn ServiceRepository>,
        versions: Arc<dyn ServiceVersionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            services,
            versions,
            clock,
        }
    }

    pub async fn create_service(
        &self,
        organization_id: Uuid,
        name: &str,
        description: &str,
    ) -> DomainResult<Service> {
        let service = Service::new(organization_id, name, description, self.clock.now());
        let service = self.services.create(&service).await?;
        info!("Created service {} in organization {}", service.id, organization_id);
        Ok(service)
    }

    /// List services, optionally filling `metadata.versionCount`
    pub async fn list_services(
        &self,
        organization_id: Uuid,
        query: &ListQuery,
        include_version_count: bool,
    ) -> DomainResult<Page<Service>> {
        let mut page = self.services.list(organization_id, query).await?;
        if include_version_count && !page.items.is_empty() {
            let ids: Vec<Uuid> = page.items.iter().map(|s| s.id).collect();
            let counts = self.services.count_versions(&ids).await?;
            for service in &mut page.items {
                service.metadata.version_count = Some(counts.get(&service.id).copied().unwrap_or(0));
            }
        }
        Ok(page)
    }

    pub async fn get_service(
        &self,
        organization_id: Uuid,
        service_id: Uuid,
        include_version_count: bool,
    ) -> DomainResult<Service> {
        let mut service = self
            .services
            .find_by_id(organization_id, service_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Service"))?;

        if include_version_count {
            let counts = self.services.count_versions(&[service.id]).await?;
            service.metadata.version_count = Some(counts.get(&service.id).copied().unwrap_or(0));
        }
        Ok(service)
    }

    pub async fn update_service(
        &self,
        organization_id: Uuid,
        service_id: Uuid,
        name: &str,
        description: &str,
    ) -> DomainResult<Service> {
        let mut service = self.get_service(organization_id, service_id, false).await?;
        service.name = name.to_string();
        service.description = description.to_string();
        service.updated_at = self.clock.now();

        if !self.services.update(&service).await? {
            return Err(DomainError::not_found("Service"));
        }
        Ok(service)
    }

    /// Delete a service and all of its versions
    pub async fn delete_service(&self, organization_id: Uuid, service_id: Uuid) -> DomainResult<()> {
        if !self.services.delete(organization_id, service_id).await? {
            return Err(DomainError::not_found("Service"));
        }
        info!("Deleted service {} from organization {}", service_id, organization_id);
        Ok(())
    }

    /// Create a version; a missing release timestamp defaults to now
    ///
    /// # Returns
    ///
    /// * `Err(DomainError::NotFound)` - The service is not in this organization
    /// * `Err(DomainError::Conflict)` - The version string already exists
    pub async fn create_version(
        &self,
        organization_id: Uuid,
        service_id: Uuid,
        version: &str,
        description: &str,
        release_timestamp: Option<DateTime<Utc>>,
    ) -> DomainResult<ServiceVersion> {
        if !is_semver(version) {
            return Err(DomainError::Validation {
                message: "Version must be a valid semantic version (e.g., 1.0.0, 2.1.3-beta)".to_string(),
            });
        }
        self.get_service(organization_id, service_id, false).await?;

        let now = self.clock.now();
        let version = ServiceVersion::new(
            service_id,
            version,
            description,
            release_timestamp.unwrap_or(now),
            now,
        );
        self.versions.create(&version).await
    }

    pub async fn list_versions(
        &self,
        organization_id: Uuid,
        service_id: Uuid,
        query: &ListQuery,
    ) -> DomainResult<Page<ServiceVersion>> {
        self.get_service(organization_id, service_id, false).await?;
        self.versions.list(service_id, query).await
    }

    pub async fn get_version(
        &self,
        organization_id: Uuid,
        service_id: Uuid,
        version_id: Uuid,
    ) -> DomainResult<ServiceVersion> {
        self.get_service(organization_id, service_id, false).await?;
        self.versions
            .find_by_id(service_id, version_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Service version"))
    }

    /// Apply the fields present in `changes`
    pub async fn update_version(
        &self,
        organization_id: Uuid,
        service_id: Uuid,
        version_id: Uuid,
        changes: VersionUpdate,
    ) -> DomainResult<ServiceVersion> {
        let mut version = self.get_version(organization_id, service_id, version_id).await?;
        if let Some(description) = changes.description {
            version.description = description;
        }
        if let Some(release_timestamp) = changes.release_timestamp {
            version.release_timestamp = release_timestamp;
        }
        version.updated_at = self.clock.now();

        if !self.versions.update(&version).await? {
            return Err(DomainError::not_found("Service version"));
        }
        Ok(version)
    }

    pub async fn delete_version(
        &self,
        organization_id: Uuid,
        service_id: Uuid,
        version_id: Uuid,
    ) -> DomainResult<()> {
        self.get_service(organization_id, service_id, false).await?;
        if !self.versions.delete(service_id, version_id).await? {
            return Err(DomainError::not_found("Service version"));
        }
        Ok(())
    }
}
