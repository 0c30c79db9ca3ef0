//! PostgreSQL implementation of the ServiceRepository trait.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use uuid::Uuid;

use kn_core::domain::entities::{Service, ServiceMetadata};
use kn_core::domain::value_objects::{ListQuery, Page};
use kn_core::errors::DomainError;
use kn_core::repositories::ServiceRepository;

use super::{contains_pattern, order_by, persistence_error};

/// PostgreSQL implementation of ServiceRepository
pub struct PgServiceRepository {
    pool: PgPool,
}

impl PgServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_service(row: &PgRow) -> Result<Service, sqlx::Error> {
        Ok(Service {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            organization_id: row.try_get("organization_id")?,
            metadata: ServiceMetadata::default(),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl ServiceRepository for PgServiceRepository {
    async fn create(&self, service: &Service) -> Result<Service, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO services (id, name, description, organization_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(service.id)
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.organization_id)
        .bind(service.created_at)
        .bind(service.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| persistence_error("Failed to create service", e))?;

        Ok(service.clone())
    }

    async fn find_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Service>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, organization_id, created_at, updated_at
            FROM services
            WHERE id = $1 AND organization_id = $2
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence_error("Failed to find service", e))?;

        row.as_ref()
            .map(Self::row_to_service)
            .transpose()
            .map_err(|e| persistence_error("Failed to map service row", e))
    }

    async fn list(
        &self,
        organization_id: Uuid,
        query: &ListQuery,
    ) -> Result<Page<Service>, DomainError> {
        let pattern = contains_pattern(query.search.as_deref());

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM services s
            WHERE s.organization_id = $1 AND ($2::TEXT IS NULL OR s.name ILIKE $2)
            "#,
        )
        .bind(organization_id)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| persistence_error("Failed to count services", e))?;

        let sql = format!(
            r#"
            SELECT s.id, s.name, s.description, s.organization_id, s.created_at, s.updated_at
            FROM services s
            WHERE s.organization_id = $1 AND ($2::TEXT IS NULL OR s.name ILIKE $2)
            {}
            LIMIT $3 OFFSET $4
            "#,
            order_by("s", &query.sort)
        );

        let rows = sqlx::query(&sql)
            .bind(organization_id)
            .bind(&pattern)
            .bind(query.pagination.limit())
            .bind(query.pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| persistence_error("Failed to list services", e))?;

        let items = rows
            .iter()
            .map(Self::row_to_service)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| persistence_error("Failed to map service row", e))?;

        Ok(Page::new(items, total.max(0) as u64))
    }

    async fn update(&self, service: &Service) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE services
            SET name = $3, description = $4, updated_at = $5
            WHERE id = $1 AND organization_id = $2
            "#,
        )
        .bind(service.id)
        .bind(service.organization_id)
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| persistence_error("Failed to update service", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(&self.pool)
            .await
            .map_err(|e| persistence_error("Failed to delete service", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_versions(&self, service_ids: &[Uuid]) -> Result<HashMap<Uuid, i64>, DomainError> {
        let mut counts: HashMap<Uuid, i64> = service_ids.iter().map(|id| (*id, 0)).collect();
        if service_ids.is_empty() {
            return Ok(counts);
        }

        let rows: Vec<(Uuid, i64)> = sqlx::query_as(
            r#"
            SELECT service_id, COUNT(*)
            FROM service_versions
            WHERE service_id = ANY($1)
            GROUP BY service_id
            "#,
        )
        .bind(service_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| persistence_error("Failed to count service versions", e))?;

        counts.extend(rows);
        Ok(counts)
    }
}
