use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::RevokedToken;
use crate::errors::DomainError;
use crate::repositories::RevokedTokenRepository;

use super::MemoryStore;

#[async_trait]
impl RevokedTokenRepository for MemoryStore {
    async fn insert_if_absent(&self, token: &RevokedToken) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.revoked_tokens.contains_key(&token.token_hash) {
            return Ok(false);
        }
        tables
            .revoked_tokens
            .insert(token.token_hash.clone(), token.clone());
        Ok(true)
    }

    async fn is_revoked(&self, token_hash: &str, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .revoked_tokens
            .get(token_hash)
            .map(|record| record.is_active(now))
            .unwrap_or(false))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut tables = self.tables.write().await;
        let before = tables.revoked_tokens.len();
        tables.revoked_tokens.retain(|_, record| record.is_active(now));
        Ok((before - tables.revoked_tokens.len()) as u64)
    }
}
