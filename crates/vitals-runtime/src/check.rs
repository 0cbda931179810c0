use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, error};
use vitals_engine::{compute_score, diagnose_report};
use vitals_probes::{
    BatteryProbe, BluetoothProbe, CommandRunner, CpuProbe, DiskProbe, ICloudProbe, MemoryProbe,
    NetworkProbe, Probe, ThermalProbe, TimeMachineProbe,
};
use vitals_types::{AggregateReport, CompositeScore, DiagnoseReport};

use crate::config::Config;

/// Runs the nine probes concurrently and assembles one report.
#[derive(Clone)]
pub struct HealthCheck {
    runner: Arc<dyn CommandRunner>,
}

impl HealthCheck {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(config.runner()))
    }

    /// Collect every subsystem and score the result.
    ///
    /// Waits for all probes; there is no per-probe deadline.
    pub async fn run(&self) -> AggregateReport {
        let started = Instant::now();
        let timestamp = Utc::now();

        let (cpu, memory, disk, thermal, icloud, battery, timemachine, network, bluetooth) = tokio::join!(
            self.spawn_probe(CpuProbe),
            self.spawn_probe(MemoryProbe),
            self.spawn_probe(DiskProbe),
            self.spawn_probe(ThermalProbe),
            self.spawn_probe(ICloudProbe),
            self.spawn_probe(BatteryProbe),
            self.spawn_probe(TimeMachineProbe),
            self.spawn_probe(NetworkProbe),
            self.spawn_probe(BluetoothProbe),
        );

        let mut report = AggregateReport {
            timestamp,
            score: CompositeScore::default(),
            cpu,
            memory,
            disk,
            thermal,
            icloud,
            battery,
            timemachine,
            network,
            bluetooth,
        };
        report.score = compute_score(&report.statuses());

        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            score = report.score.value,
            status = %report.score.status,
            "health check complete"
        );
        report
    }

    /// Run a check and attach diagnoses for every non-nominal subsystem.
    pub async fn diagnose(&self) -> DiagnoseReport {
        diagnose_report(self.run().await)
    }

    async fn spawn_probe<P: Probe>(&self, probe: P) -> P::Record {
        let probe = Arc::new(probe);
        let runner = Arc::clone(&self.runner);
        let task_probe = Arc::clone(&probe);

        match tokio::task::spawn_blocking(move || task_probe.collect(runner.as_ref())).await {
            Ok(record) => record,
            Err(join_error) => {
                let subsystem = probe.subsystem();
                error!(%subsystem, error = %join_error, "probe task failed");
                probe.unavailable(format!("{} probe failed: {}", subsystem, join_error))
            }
        }
    }
}
