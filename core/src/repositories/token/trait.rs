//! Revoked token repository trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RevokedToken;
use crate::errors::DomainError;

/// Persistence for fingerprints of logged-out tokens
///
/// Implementations must enforce uniqueness of `token_hash`.
#[async_trait]
pub trait RevokedTokenRepository: Send + Sync {
    /// Insert a record unless one with the same hash exists
    ///
    /// # Returns
    /// * `Ok(true)` - Row inserted
    /// * `Ok(false)` - Hash already present, nothing changed
    /// * `Err(DomainError)` - Datastore failure
    async fn insert_if_absent(&self, token: &RevokedToken) -> Result<bool, DomainError>;

    /// Whether an unexpired record (`expires_at > now`) exists for the hash
    async fn is_revoked(&self, token_hash: &str, now: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Delete every record with `expires_at <= now`
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of rows removed
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
