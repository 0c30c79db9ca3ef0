use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Membership, Organization};
use crate::domain::value_objects::{ListQuery, Page};
use crate::errors::DomainError;
use crate::repositories::OrganizationRepository;

use super::{contains_ignore_case, paginate, MemoryStore};

#[async_trait]
impl OrganizationRepository for MemoryStore {
    async fn create_with_member(
        &self,
        organization: &Organization,
        membership: &Membership,
    ) -> Result<Organization, DomainError> {
        let mut tables = self.tables.write().await;
        tables
            .organizations
            .insert(organization.id, organization.clone());
        tables.memberships.insert(
            (membership.user_id, membership.organization_id),
            membership.clone(),
        );
        Ok(organization.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.organizations.get(&id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        query: &ListQuery,
    ) -> Result<Page<Organization>, DomainError> {
        let tables = self.tables.read().await;
        let rows: Vec<Organization> = tables
            .memberships
            .keys()
            .filter(|(member, _)| *member == user_id)
            .filter_map(|(_, org_id)| tables.organizations.get(org_id))
            .filter(|org| match &query.search {
                Some(q) => contains_ignore_case(&org.name, q),
                None => true,
            })
            .cloned()
            .collect();

        let (items, total) = paginate(rows, &query.sort, &query.pagination);
        Ok(Page::new(items, total))
    }

    async fn update(&self, organization: &Organization) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        match tables.organizations.get_mut(&organization.id) {
            Some(existing) => {
                existing.name = organization.name.clone();
                existing.description = organization.description.clone();
                existing.updated_at = organization.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        Ok(tables.remove_organization(id))
    }

    async fn is_member(&self, user_id: Uuid, organization_id: Uuid) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.memberships.contains_key(&(user_id, organization_id)))
    }
}
