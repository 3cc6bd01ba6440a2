//! Dedicated background thread per window running its refresh scheduler.

use std::sync::mpsc;
use std::thread::JoinHandle;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::scheduler::errors::SchedulerError;
use crate::scheduler::operations::{CycleReport, RefreshScheduler};

/// Owner of a running scheduler thread.
///
/// Dropping the handle cancels the loop but does not wait for it; call
/// [`SchedulerHandle::shutdown`] to cancel and join.
pub struct SchedulerHandle {
    window: String,
    token: CancellationToken,
    thread: Option<JoinHandle<()>>,
    seed_report: CycleReport,
}

impl RefreshScheduler {
    /// Start the scheduler on its own thread with a single-threaded runtime.
    ///
    /// Blocks until every fetcher has run once, so the first frame drawn
    /// after this returns sees data for each key whose fetch succeeded.
    pub fn spawn(self) -> Result<SchedulerHandle, SchedulerError> {
        let window = self.window().to_string();
        let token = CancellationToken::new();
        let thread_token = token.clone();
        let (seeded_tx, seeded_rx) = mpsc::channel::<Result<CycleReport, String>>();

        let thread = std::thread::Builder::new()
            .name(format!("uxshell-data-{}", window))
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(e) => {
                        let _ = seeded_tx.send(Err(e.to_string()));
                        return;
                    }
                };

                runtime.block_on(async move {
                    let report = self.seed(&thread_token).await;
                    if seeded_tx.send(Ok(report)).is_err() {
                        return;
                    }
                    self.run(thread_token).await;
                });
            })
            .map_err(|e| SchedulerError::ThreadSpawn {
                window: window.clone(),
                message: e.to_string(),
            })?;

        let seed_report = match seeded_rx.recv() {
            Ok(Ok(report)) => report,
            Ok(Err(message)) => {
                let _ = thread.join();
                return Err(SchedulerError::RuntimeBuild { window, message });
            }
            Err(_) => {
                let _ = thread.join();
                error!(event = "core.scheduler.seed_aborted", window = %window);
                return Err(SchedulerError::SeedAborted { window });
            }
        };

        info!(
            event = "core.scheduler.started",
            window = %window,
            seeded = seed_report.ran,
            seed_failures = seed_report.failed,
        );

        Ok(SchedulerHandle {
            window,
            token,
            thread: Some(thread),
            seed_report,
        })
    }
}

impl SchedulerHandle {
    /// False once the thread has exited, whether by shutdown or by a panic
    /// inside a fetcher.
    pub fn is_alive(&self) -> bool {
        self.thread
            .as_ref()
            .is_some_and(|thread| !thread.is_finished())
    }

    pub fn seed_report(&self) -> CycleReport {
        self.seed_report
    }

    /// Cancel the loop and wait for the thread to exit. Idempotent.
    pub fn shutdown(&mut self) -> Result<(), SchedulerError> {
        self.token.cancel();

        let Some(thread) = self.thread.take() else {
            return Ok(());
        };

        thread.join().map_err(|_| SchedulerError::JoinFailed {
            window: self.window.clone(),
        })?;

        info!(event = "core.scheduler.stopped", window = %self.window);
        Ok(())
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
