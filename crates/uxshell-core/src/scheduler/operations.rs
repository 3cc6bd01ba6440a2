//! Refresh cycles: decide which fetchers are due, run them, publish results.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::fetch::{FetchError, Fetcher};
use crate::store::{SharedStore, StoreSnapshot};

/// Outcome of one scheduler cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Fetchers that were due and started.
    pub ran: usize,
    /// Of those, how many failed or timed out.
    pub failed: usize,
    /// True if cancellation interrupted the cycle.
    pub cancelled: bool,
}

/// Keeps one window's store up to date with its fetchers.
#[derive(Clone)]
pub struct RefreshScheduler {
    window: String,
    store: Arc<SharedStore>,
    fetchers: Arc<[Fetcher]>,
    default_timeout: Duration,
}

impl RefreshScheduler {
    pub fn new(
        window: impl Into<String>,
        store: Arc<SharedStore>,
        fetchers: Vec<Fetcher>,
        default_timeout: Duration,
    ) -> Self {
        Self {
            window: window.into(),
            store,
            fetchers: fetchers.into(),
            default_timeout,
        }
    }

    pub fn window(&self) -> &str {
        &self.window
    }

    pub fn store(&self) -> &Arc<SharedStore> {
        &self.store
    }

    /// Run every fetcher once regardless of its interval.
    pub async fn seed(&self, token: &CancellationToken) -> CycleReport {
        self.cycle(true, token).await
    }

    /// Run the fetchers that are due, in registration order, holding the
    /// store's writer lock for the whole cycle.
    pub async fn run_cycle(&self, token: &CancellationToken) -> CycleReport {
        self.cycle(false, token).await
    }

    async fn cycle(&self, force: bool, token: &CancellationToken) -> CycleReport {
        let mut report = CycleReport::default();
        let writer = self.store.writer().await;

        for fetcher in self.fetchers.iter() {
            let now = Instant::now();
            let snapshot = writer.snapshot();
            if !force && !fetcher.is_due(now, snapshot.timestamp(fetcher.key())) {
                continue;
            }

            report.ran += 1;
            match self.run_fetcher(fetcher, snapshot, token).await {
                Ok(value) => {
                    writer.publish_result(fetcher.key(), value, now);
                }
                Err(FetchError::Cancelled) => {
                    report.cancelled = true;
                    break;
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(
                        event = "core.scheduler.fetch_failed",
                        window = %self.window,
                        key = fetcher.key(),
                        error = %e,
                    );
                }
            }
        }

        debug!(
            event = "core.scheduler.cycle_completed",
            window = %self.window,
            ran = report.ran,
            failed = report.failed,
        );
        report
    }

    async fn run_fetcher(
        &self,
        fetcher: &Fetcher,
        snapshot: Arc<StoreSnapshot>,
        token: &CancellationToken,
    ) -> Result<Value, FetchError> {
        let timeout = fetcher.timeout().unwrap_or(self.default_timeout);

        tokio::select! {
            _ = token.cancelled() => Err(FetchError::Cancelled),
            result = tokio::time::timeout(timeout, fetcher.invoke(snapshot)) => match result {
                Ok(result) => result,
                Err(_) => Err(FetchError::TimedOut {
                    key: fetcher.key().to_string(),
                    timeout_ms: timeout.as_millis(),
                }),
            },
        }
    }

    /// Cycle until cancelled, idling for the store's refresh period between
    /// cycles.
    pub async fn run(&self, token: CancellationToken) {
        loop {
            if self.run_cycle(&token).await.cancelled {
                break;
            }

            let period = self.store.snapshot().refresh_period();
            tokio::select! {
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(period) => {}
            }
        }

        debug!(event = "core.scheduler.loop_stopped", window = %self.window);
    }
}
