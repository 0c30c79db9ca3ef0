//! Background reclamation of expired revocation records

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use kn_shared::RevocationConfig;

use crate::errors::DomainError;

use super::store::RevocationStore;

/// Periodically deletes expired revocation records
pub struct RevocationReaper {
    store: Arc<RevocationStore>,
    interval: Duration,
}

impl RevocationReaper {
    /// Create a reaper using the configured interval
    pub fn new(store: Arc<RevocationStore>, config: &RevocationConfig) -> Self {
        let minutes = config.cleanup_interval_minutes.max(1);
        Self::with_interval(store, Duration::from_secs(minutes * 60))
    }

    /// Create a reaper with an explicit period
    pub fn with_interval(store: Arc<RevocationStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run a single reap
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of records removed
    pub async fn run_once(&self) -> Result<u64, DomainError> {
        let removed = self.store.reap().await?;
        if removed > 0 {
            info!("Removed {} expired revoked tokens", removed);
        } else {
            debug!("No expired revoked tokens to remove");
        }
        Ok(removed)
    }

    /// Start the reaper as a background task
    ///
    /// The first run happens one full interval after start. Missed ticks are
    /// skipped. The task ends when `shutdown` turns `true` or its sender is
    /// dropped.
    pub fn start_background_task(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "Revoked token cleanup started - will run every {} seconds",
                self.interval.as_secs()
            );

            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = self.run_once().await {
                            error!("Revoked token cleanup failed: {}", e);
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Revoked token cleanup stopped");
        })
    }
}
