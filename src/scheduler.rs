//! Interval trigger for agent runs.
//!
//! The first tick fires immediately, so a run starts at startup and then once
//! per interval. At most one run holds the working tree at a time: a tick that
//! arrives while a run is still going is skipped.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard, watch};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Single-slot lock around the shared working tree.
#[derive(Clone, Default)]
pub struct RunGuard(Arc<Mutex<()>>);

impl RunGuard {
    pub fn try_acquire(&self) -> Option<OwnedMutexGuard<()>> {
        Arc::clone(&self.0).try_lock_owned().ok()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleReport {
    pub started: usize,
    pub skipped: usize,
}

pub struct Scheduler {
    interval: Duration,
    guard: RunGuard,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            guard: RunGuard::default(),
        }
    }

    /// Triggers `job` every interval until `shutdown` flips to `true`. A job
    /// still running at shutdown is left to the runtime.
    pub async fn run<F, Fut>(self, job: F, mut shutdown: watch::Receiver<bool>) -> ScheduleReport
    where
        F: Fn() -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut report = ScheduleReport::default();
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = self.interval.as_secs(), "scheduler started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let Some(permit) = self.guard.try_acquire() else {
                        report.skipped += 1;
                        warn!("previous run still in progress, skipping this trigger");
                        continue;
                    };
                    report.started += 1;
                    let run = job();
                    tokio::spawn(async move {
                        run.await;
                        drop(permit);
                    });
                }
                _ = stop_requested(&mut shutdown) => {
                    info!(started = report.started, skipped = report.skipped, "scheduler stopped");
                    break;
                }
            }
        }
        report
    }
}

/// Resolves once `true` is sent or the sender goes away.
async fn stop_requested(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}
