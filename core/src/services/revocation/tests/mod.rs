mod store_tests;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::entities::token::RevokedToken;
use crate::errors::DomainError;
use crate::repositories::RevokedTokenRepository;

/// Repository whose every call fails until `failures` calls have been made
#[derive(Default)]
pub(super) struct FailingRepository {
    pub failures: usize,
    pub calls: AtomicUsize,
}

impl FailingRepository {
    pub fn always() -> Self {
        Self {
            failures: usize::MAX,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn times(failures: usize) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
        }
    }

    fn next(&self) -> Result<(), DomainError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err(DomainError::persistence("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RevokedTokenRepository for FailingRepository {
    async fn insert_if_absent(&self, _token: &RevokedToken) -> Result<bool, DomainError> {
        self.next().map(|_| true)
    }

    async fn is_revoked(&self, _token_hash: &str, _now: DateTime<Utc>) -> Result<bool, DomainError> {
        self.next().map(|_| true)
    }

    async fn delete_expired(&self, _now: DateTime<Utc>) -> Result<u64, DomainError> {
        self.next().map(|_| 0)
    }
}
