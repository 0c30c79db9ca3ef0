//! Revocation store: fingerprints of logged-out tokens

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::entities::token::RevokedToken;
use crate::errors::DomainError;
use crate::repositories::RevokedTokenRepository;

/// Tracks revoked tokens until their natural expiry
pub struct RevocationStore {
    repository: Arc<dyn RevokedTokenRepository>,
    clock: Arc<dyn Clock>,
}

impl RevocationStore {
    pub fn new(repository: Arc<dyn RevokedTokenRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Record a revoked token
    ///
    /// Recording the same fingerprint twice succeeds without changes.
    ///
    /// # Arguments
    /// * `fingerprint` - SHA-256 hex of the raw token
    /// * `user_id` - Token owner
    /// * `expires_at` - The token's own `exp`
    ///
    /// # Returns
    /// * `Err(DomainError::Persistence)` - The datastore failed; the token
    ///   is not revoked
    pub async fn record(
        &self,
        fingerprint: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let record = RevokedToken::new(fingerprint, user_id, expires_at, self.clock.now());
        let inserted = self.repository.insert_if_absent(&record).await?;
        if !inserted {
            debug!("Token already revoked for user {}", user_id);
        }
        Ok(())
    }

    /// Whether an unexpired revocation exists for the fingerprint
    ///
    /// Datastore failures are logged and reported as not revoked.
    pub async fn is_revoked(&self, fingerprint: &str) -> bool {
        match self.repository.is_revoked(fingerprint, self.clock.now()).await {
            Ok(revoked) => revoked,
            Err(e) => {
                error!("Revocation lookup failed, allowing token: {}", e);
                false
            }
        }
    }

    /// Delete every record whose token has expired
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of records removed
    pub async fn reap(&self) -> Result<u64, DomainError> {
        self.repository.delete_expired(self.clock.now()).await
    }
}
