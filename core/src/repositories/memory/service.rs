use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::entities::{Service, ServiceVersion};
use crate::domain::value_objects::{ListQuery, Page};
use crate::errors::DomainError;
use crate::repositories::{ServiceRepository, ServiceVersionRepository};

use super::{contains_ignore_case, paginate, starts_with_ignore_case, MemoryStore};

#[async_trait]
impl ServiceRepository for MemoryStore {
    async fn create(&self, service: &Service) -> Result<Service, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.organizations.contains_key(&service.organization_id) {
            return Err(DomainError::not_found("Organization"));
        }
        tables.services.insert(service.id, service.clone());
        Ok(service.clone())
    }

    async fn find_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Service>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .services
            .get(&id)
            .filter(|s| s.organization_id == organization_id)
            .cloned())
    }

    async fn list(
        &self,
        organization_id: Uuid,
        query: &ListQuery,
    ) -> Result<Page<Service>, DomainError> {
        let tables = self.tables.read().await;
        let rows: Vec<Service> = tables
            .services
            .values()
            .filter(|s| s.organization_id == organization_id)
            .filter(|s| match &query.search {
                Some(q) => contains_ignore_case(&s.name, q),
                None => true,
            })
            .cloned()
            .collect();

        let (items, total) = paginate(rows, &query.sort, &query.pagination);
        Ok(Page::new(items, total))
    }

    async fn update(&self, service: &Service) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        match tables
            .services
            .get_mut(&service.id)
            .filter(|s| s.organization_id == service.organization_id)
        {
            Some(existing) => {
                existing.name = service.name.clone();
                existing.description = service.description.clone();
                existing.updated_at = service.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .services
            .get(&id)
            .is_some_and(|s| s.organization_id == organization_id);
        Ok(owned && tables.remove_service(id))
    }

    async fn count_versions(&self, service_ids: &[Uuid]) -> Result<HashMap<Uuid, i64>, DomainError> {
        let tables = self.tables.read().await;
        let mut counts: HashMap<Uuid, i64> = service_ids.iter().map(|id| (*id, 0)).collect();
        for version in tables.versions.values() {
            if let Some(count) = counts.get_mut(&version.service_id) {
                *count += 1;
            }
        }
        Ok(counts)
    }
}

#[async_trait]
impl ServiceVersionRepository for MemoryStore {
    async fn create(&self, version: &ServiceVersion) -> Result<ServiceVersion, DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.services.contains_key(&version.service_id) {
            return Err(DomainError::not_found("Service"));
        }
        let duplicate = tables
            .versions
            .values()
            .any(|v| v.service_id == version.service_id && v.version == version.version);
        if duplicate {
            return Err(DomainError::Conflict {
                message: format!("Version {} already exists for this service", version.version),
            });
        }
        tables.versions.insert(version.id, version.clone());
        Ok(version.clone())
    }

    async fn find_by_id(
        &self,
        service_id: Uuid,
        id: Uuid,
    ) -> Result<Option<ServiceVersion>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .versions
            .get(&id)
            .filter(|v| v.service_id == service_id)
            .cloned())
    }

    async fn list(
        &self,
        service_id: Uuid,
        query: &ListQuery,
    ) -> Result<Page<ServiceVersion>, DomainError> {
        let tables = self.tables.read().await;
        let rows: Vec<ServiceVersion> = tables
            .versions
            .values()
            .filter(|v| v.service_id == service_id)
            .filter(|v| match &query.search {
                Some(prefix) => starts_with_ignore_case(&v.version, prefix),
                None => true,
            })
            .cloned()
            .collect();

        let (items, total) = paginate(rows, &query.sort, &query.pagination);
        Ok(Page::new(items, total))
    }

    async fn update(&self, version: &ServiceVersion) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        match tables
            .versions
            .get_mut(&version.id)
            .filter(|v| v.service_id == version.service_id)
        {
            Some(existing) => {
                existing.description = version.description.clone();
                existing.release_timestamp = version.release_timestamp;
                existing.updated_at = version.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, service_id: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .versions
            .get(&id)
            .is_some_and(|v| v.service_id == service_id);
        if owned {
            tables.versions.remove(&id);
        }
        Ok(owned)
    }
}
