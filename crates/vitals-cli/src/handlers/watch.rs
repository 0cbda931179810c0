use crate::output::{OutputMode, print_json};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::info;
use vitals_runtime::{HealthCheck, StopSignal, Watcher};

pub async fn handle(check: HealthCheck, interval: Duration, count: Option<u64>) -> Result<i32> {
    let stop = StopSignal::new();
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || {
        handler_stop.trigger();
    })
    .context("failed to install interrupt handler")?;

    info!(interval_secs = interval.as_secs(), "starting watch");

    let mut watcher = Watcher::new(check, interval).with_stop_signal(stop);
    if let Some(count) = count {
        watcher = watcher.with_max_ticks(count);
    }

    // One record per line regardless of terminal.
    let last = watcher
        .run(|report| Ok(print_json(report, OutputMode::Compact)?))
        .await?;

    Ok(last.map_or(0, |report| report.exit_code()))
}
