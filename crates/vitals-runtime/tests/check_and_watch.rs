// Full check and watch loop over scripted machines: probes → score → diagnoses
use std::sync::Arc;
use std::time::Duration;

use vitals_runtime::{HealthCheck, StopSignal, Watcher};
use vitals_testing::fixtures::{bare_machine, healthy_machine, stressed_machine};
use vitals_types::{Severity, Subsystem};

#[tokio::test]
async fn test_healthy_machine_scores_full_marks() {
    let report = HealthCheck::new(Arc::new(healthy_machine())).run().await;

    assert_eq!(report.score.value, 100);
    assert_eq!(report.score.status, Severity::Nominal);
    assert!(report.score.reasons.is_empty());
    assert_eq!(report.exit_code(), 0);
}

#[tokio::test]
async fn test_stressed_machine_is_critical() {
    let diagnosed = HealthCheck::new(Arc::new(stressed_machine()))
        .diagnose()
        .await;
    let report = &diagnosed.report;

    assert_eq!(report.score.status, Severity::Critical);
    assert!(report.score.value < 50);
    assert!(report.score.reasons.contains(&"network:critical".to_string()));
    assert!(report.score.reasons.contains(&"bluetooth:degraded".to_string()));
    assert_eq!(diagnosed.exit_code(), 2);

    let diagnosed_subsystems: Vec<Subsystem> =
        diagnosed.diagnoses.iter().map(|d| d.subsystem).collect();
    assert_eq!(diagnosed_subsystems[0], Subsystem::Cpu);
    assert!(diagnosed_subsystems.contains(&Subsystem::Bluetooth));
    assert_eq!(diagnosed.diagnoses.len(), report.score.reasons.len());
}

#[tokio::test]
async fn test_bare_machine_falls_back_everywhere() {
    let report = HealthCheck::new(Arc::new(bare_machine())).run().await;

    assert_eq!(report.network.status, Severity::Critical);
    assert_eq!(report.score.status, Severity::Critical);
    assert_eq!(report.cpu.logical_cores, 1);
    assert!(!report.battery.installed);

    // Memory and disk are unknown, network is offline; everything else holds its default.
    assert_eq!(
        report.score.reasons,
        ["memory:degraded", "disk:degraded", "network:critical"]
    );
    assert!(report.errors().len() >= 8);
}

#[tokio::test]
async fn test_watch_stops_after_tick_limit() -> vitals_runtime::Result<()> {
    let watcher = Watcher::new(
        HealthCheck::new(Arc::new(healthy_machine())),
        Duration::from_millis(10),
    )
    .with_max_ticks(3);

    let mut scores = Vec::new();
    let last = watcher
        .run(|report| {
            scores.push(report.score.value);
            Ok(())
        })
        .await?;

    assert_eq!(scores, [100, 100, 100]);
    assert_eq!(last.map(|r| r.score.value), Some(100));
    Ok(())
}

#[tokio::test]
async fn test_stop_prevents_next_check() -> vitals_runtime::Result<()> {
    let stop = StopSignal::new();
    let watcher = Watcher::new(
        HealthCheck::new(Arc::new(healthy_machine())),
        Duration::from_secs(3600),
    )
    .with_stop_signal(stop.clone());

    let mut ticks = 0;
    let last = watcher
        .run(|_| {
            ticks += 1;
            stop.trigger();
            Ok(())
        })
        .await?;

    assert_eq!(ticks, 1);
    assert!(last.is_some());
    Ok(())
}

#[tokio::test]
async fn test_stopped_watcher_runs_nothing() -> vitals_runtime::Result<()> {
    let watcher = Watcher::new(
        HealthCheck::new(Arc::new(bare_machine())),
        Duration::from_millis(10),
    );
    watcher.stop_signal().trigger();

    let last = watcher.run(|_| Ok(())).await?;
    assert!(last.is_none());
    Ok(())
}
