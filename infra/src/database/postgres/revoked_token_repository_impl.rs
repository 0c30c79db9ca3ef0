//! PostgreSQL implementation of the RevokedTokenRepository trait.
//!
//! Rows are keyed by the token fingerprint; inserts use
//! `ON CONFLICT DO NOTHING` so concurrent logouts of one token are harmless.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use kn_core::domain::entities::RevokedToken;
use kn_core::errors::DomainError;
use kn_core::repositories::RevokedTokenRepository;

use super::persistence_error;

/// PostgreSQL implementation of RevokedTokenRepository
pub struct PgRevokedTokenRepository {
    pool: PgPool,
}

impl PgRevokedTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevokedTokenRepository for PgRevokedTokenRepository {
    async fn insert_if_absent(&self, token: &RevokedToken) -> Result<bool, DomainError> {
        let query = r#"
            INSERT INTO revoked_tokens (token_hash, user_id, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (token_hash) DO NOTHING
        "#;

        let result = sqlx::query(query)
            .bind(&token.token_hash)
            .bind(token.user_id)
            .bind(token.expires_at)
            .bind(token.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| persistence_error("Failed to record revoked token", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn is_revoked(&self, token_hash: &str, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM revoked_tokens WHERE token_hash = $1 AND expires_at > $2
            )
        "#;

        sqlx::query_scalar::<_, bool>(query)
            .bind(token_hash)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| persistence_error("Failed to look up revoked token", e))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| persistence_error("Failed to delete expired revoked tokens", e))?;

        Ok(result.rows_affected())
    }
}
