//! PostgreSQL implementation of the OrganizationRepository trait.
//!
//! Memberships live in `user_organization_maps`. Deleting an organization
//! relies on `ON DELETE CASCADE` for memberships, services and versions.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use kn_core::domain::entities::{Membership, Organization};
use kn_core::domain::value_objects::{ListQuery, Page};
use kn_core::errors::DomainError;
use kn_core::repositories::OrganizationRepository;

use super::{contains_pattern, order_by, persistence_error};

/// PostgreSQL implementation of OrganizationRepository
pub struct PgOrganizationRepository {
    pool: PgPool,
}

impl PgOrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_organization(row: &PgRow) -> Result<Organization, sqlx::Error> {
        Ok(Organization {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            created_by: row.try_get("created_by")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl OrganizationRepository for PgOrganizationRepository {
    async fn create_with_member(
        &self,
        organization: &Organization,
        membership: &Membership,
    ) -> Result<Organization, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| persistence_error("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO organizations (id, name, description, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(organization.id)
        .bind(&organization.name)
        .bind(&organization.description)
        .bind(organization.created_by)
        .bind(organization.created_at)
        .bind(organization.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| persistence_error("Failed to create organization", e))?;

        sqlx::query(
            r#"
            INSERT INTO user_organization_maps (user_id, organization_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(membership.user_id)
        .bind(membership.organization_id)
        .bind(membership.created_at)
        .bind(membership.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| persistence_error("Failed to create membership", e))?;

        tx.commit()
            .await
            .map_err(|e| persistence_error("Failed to commit organization", e))?;

        Ok(organization.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, created_by, created_at, updated_at
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence_error("Failed to find organization", e))?;

        row.as_ref()
            .map(Self::row_to_organization)
            .transpose()
            .map_err(|e| persistence_error("Failed to map organization row", e))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        query: &ListQuery,
    ) -> Result<Page<Organization>, DomainError> {
        let pattern = contains_pattern(query.search.as_deref());

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM organizations o
            JOIN user_organization_maps m ON m.organization_id = o.id
            WHERE m.user_id = $1 AND ($2::TEXT IS NULL OR o.name ILIKE $2)
            "#,
        )
        .bind(user_id)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| persistence_error("Failed to count organizations", e))?;

        let sql = format!(
            r#"
            SELECT o.id, o.name, o.description, o.created_by, o.created_at, o.updated_at
            FROM organizations o
            JOIN user_organization_maps m ON m.organization_id = o.id
            WHERE m.user_id = $1 AND ($2::TEXT IS NULL OR o.name ILIKE $2)
            {}
            LIMIT $3 OFFSET $4
            "#,
            order_by("o", &query.sort)
        );

        let rows = sqlx::query(&sql)
            .bind(user_id)
            .bind(&pattern)
            .bind(query.pagination.limit())
            .bind(query.pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| persistence_error("Failed to list organizations", e))?;

        let items = rows
            .iter()
            .map(Self::row_to_organization)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| persistence_error("Failed to map organization row", e))?;

        Ok(Page::new(items, total.max(0) as u64))
    }

    async fn update(&self, organization: &Organization) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE organizations
            SET name = $2, description = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(organization.id)
        .bind(&organization.name)
        .bind(&organization.description)
        .bind(organization.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| persistence_error("Failed to update organization", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| persistence_error("Failed to delete organization", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_member(&self, user_id: Uuid, organization_id: Uuid) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM user_organization_maps
                WHERE user_id = $1 AND organization_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(organization_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| persistence_error("Failed to check membership", e))
    }
}
