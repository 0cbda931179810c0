use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Notify;
use tracing::info;
use vitals_types::AggregateReport;

use crate::Result;
use crate::check::HealthCheck;

/// Shared flag telling a running watcher to stop before its next check.
///
/// Cloning shares the same flag; safe to trigger from a signal handler thread.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    async fn wait(&self) {
        self.notify.notified().await;
    }
}

/// Re-runs a health check at a fixed interval until stopped.
pub struct Watcher {
    check: HealthCheck,
    interval: Duration,
    max_ticks: Option<u64>,
    stop: StopSignal,
}

impl Watcher {
    pub fn new(check: HealthCheck, interval: Duration) -> Self {
        Self {
            check,
            interval,
            max_ticks: None,
            stop: StopSignal::new(),
        }
    }

    /// Stop after this many checks.
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Run checks, handing each report to `on_report`.
    ///
    /// A stop request only prevents the next check; one already running is
    /// allowed to finish and is still delivered. Returns the last report.
    pub async fn run<F>(&self, mut on_report: F) -> Result<Option<AggregateReport>>
    where
        F: FnMut(&AggregateReport) -> Result<()>,
    {
        let mut last = None;
        let mut ticks: u64 = 0;

        loop {
            if self.stop.is_stopped() {
                info!(ticks, "watch stopped");
                break;
            }

            let report = self.check.run().await;
            ticks += 1;
            info!(
                tick = ticks,
                score = report.score.value,
                status = %report.score.status,
                "watch tick"
            );
            on_report(&report)?;
            last = Some(report);

            if self.max_ticks.is_some_and(|max| ticks >= max) {
                info!(ticks, "watch reached tick limit");
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.stop.wait() => {}
            }
        }

        Ok(last)
    }
}
