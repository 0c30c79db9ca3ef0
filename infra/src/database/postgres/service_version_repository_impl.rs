//! PostgreSQL implementation of the ServiceVersionRepository trait.
//!
//! `(service_id, version)` is unique; a violation surfaces as a conflict.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use kn_core::domain::entities::ServiceVersion;
use kn_core::domain::value_objects::{ListQuery, Page};
use kn_core::errors::DomainError;
use kn_core::repositories::ServiceVersionRepository;

use super::{is_unique_violation, order_by, persistence_error, prefix_pattern};

/// SQLSTATE for foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// PostgreSQL implementation of ServiceVersionRepository
pub struct PgServiceVersionRepository {
    pool: PgPool,
}

impl PgServiceVersionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_version(row: &PgRow) -> Result<ServiceVersion, sqlx::Error> {
        Ok(ServiceVersion {
            id: row.try_get("id")?,
            version: row.try_get("version")?,
            description: row.try_get("description")?,
            release_timestamp: row.try_get("release_timestamp")?,
            service_id: row.try_get("service_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == FOREIGN_KEY_VIOLATION)
}

#[async_trait]
impl ServiceVersionRepository for PgServiceVersionRepository {
    async fn create(&self, version: &ServiceVersion) -> Result<ServiceVersion, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO service_versions
                (id, version, description, release_timestamp, service_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(version.id)
        .bind(&version.version)
        .bind(&version.description)
        .bind(version.release_timestamp)
        .bind(version.service_id)
        .bind(version.created_at)
        .bind(version.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict {
                    message: format!("Version {} already exists for this service", version.version),
                }
            } else if is_foreign_key_violation(&e) {
                DomainError::not_found("Service")
            } else {
                persistence_error("Failed to create service version", e)
            }
        })?;

        Ok(version.clone())
    }

    async fn find_by_id(
        &self,
        service_id: Uuid,
        id: Uuid,
    ) -> Result<Option<ServiceVersion>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, version, description, release_timestamp, service_id, created_at, updated_at
            FROM service_versions
            WHERE id = $1 AND service_id = $2
            "#,
        )
        .bind(id)
        .bind(service_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence_error("Failed to find service version", e))?;

        row.as_ref()
            .map(Self::row_to_version)
            .transpose()
            .map_err(|e| persistence_error("Failed to map service version row", e))
    }

    async fn list(
        &self,
        service_id: Uuid,
        query: &ListQuery,
    ) -> Result<Page<ServiceVersion>, DomainError> {
        let pattern = prefix_pattern(query.search.as_deref());

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM service_versions v
            WHERE v.service_id = $1 AND ($2::TEXT IS NULL OR v.version ILIKE $2)
            "#,
        )
        .bind(service_id)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| persistence_error("Failed to count service versions", e))?;

        let sql = format!(
            r#"
            SELECT v.id, v.version, v.description, v.release_timestamp, v.service_id,
                   v.created_at, v.updated_at
            FROM service_versions v
            WHERE v.service_id = $1 AND ($2::TEXT IS NULL OR v.version ILIKE $2)
            {}
            LIMIT $3 OFFSET $4
            "#,
            order_by("v", &query.sort)
        );

        let rows = sqlx::query(&sql)
            .bind(service_id)
            .bind(&pattern)
            .bind(query.pagination.limit())
            .bind(query.pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| persistence_error("Failed to list service versions", e))?;

        let items = rows
            .iter()
            .map(Self::row_to_version)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| persistence_error("Failed to map service version row", e))?;

        Ok(Page::new(items, total.max(0) as u64))
    }

    async fn update(&self, version: &ServiceVersion) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE service_versions
            SET description = $3, release_timestamp = $4, updated_at = $5
            WHERE id = $1 AND service_id = $2
            "#,
        )
        .bind(version.id)
        .bind(version.service_id)
        .bind(&version.description)
        .bind(version.release_timestamp)
        .bind(version.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| persistence_error("Failed to update service version", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, service_id: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM service_versions WHERE id = $1 AND service_id = $2")
            .bind(id)
            .bind(service_id)
            .execute(&self.pool)
            .await
            .map_err(|e| persistence_error("Failed to delete service version", e))?;

        Ok(result.rows_affected() > 0)
    }
}
