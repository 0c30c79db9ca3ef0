//! PostgreSQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use kn_core::domain::entities::User;
use kn_core::errors::DomainError;
use kn_core::repositories::UserRepository;
use kn_core::services::auth::DUPLICATE_EMAIL_MESSAGE;

use super::{is_unique_violation, persistence_error};

const USER_COLUMNS: &str = "id, email, name, password_hash, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, sqlx::Error> {
        Ok(User {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, email, name, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#;

        sqlx::query(query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::Conflict {
                        message: DUPLICATE_EMAIL_MESSAGE.to_string(),
                    }
                } else {
                    persistence_error("Failed to create user", e)
                }
            })?;

        Ok(user.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| persistence_error("Failed to find user by email", e))?;

        row.as_ref()
            .map(Self::row_to_user)
            .transpose()
            .map_err(|e| persistence_error("Failed to map user row", e))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| persistence_error("Failed to find user", e))?;

        row.as_ref()
            .map(Self::row_to_user)
            .transpose()
            .map_err(|e| persistence_error("Failed to map user row", e))
    }
}
