use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::records::*;
use crate::{Severity, Subsystem};

/// Composite health score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeScore {
    /// Worst subsystem severity after per-subsystem caps.
    pub status: Severity,
    /// Weighted average of subsystem scores, 0-100.
    pub value: u32,
    /// `"{subsystem}:{severity}"` for every non-nominal subsystem.
    pub reasons: Vec<String>,
}

/// Result of one full check. Built once per invocation and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub timestamp: DateTime<Utc>,
    pub score: CompositeScore,
    pub cpu: CpuRecord,
    pub memory: MemoryRecord,
    pub disk: DiskRecord,
    pub thermal: ThermalRecord,
    pub icloud: ICloudRecord,
    pub battery: BatteryRecord,
    pub timemachine: TimeMachineRecord,
    pub network: NetworkRecord,
    pub bluetooth: BluetoothRecord,
}

impl AggregateReport {
    /// Each subsystem's own severity, in declaration order.
    pub fn statuses(&self) -> [(Subsystem, Severity); 9] {
        [
            (Subsystem::Cpu, self.cpu.status()),
            (Subsystem::Memory, self.memory.status()),
            (Subsystem::Disk, self.disk.status()),
            (Subsystem::Thermal, self.thermal.status()),
            (Subsystem::ICloud, self.icloud.status()),
            (Subsystem::Battery, self.battery.status()),
            (Subsystem::TimeMachine, self.timemachine.status()),
            (Subsystem::Network, self.network.status()),
            (Subsystem::Bluetooth, self.bluetooth.status()),
        ]
    }

    /// Advisory errors left by probes that fell back to defaults.
    pub fn errors(&self) -> Vec<(Subsystem, &str)> {
        let errors = [
            (Subsystem::Cpu, self.cpu.error()),
            (Subsystem::Memory, self.memory.error()),
            (Subsystem::Disk, self.disk.error()),
            (Subsystem::Thermal, self.thermal.error()),
            (Subsystem::ICloud, self.icloud.error()),
            (Subsystem::Battery, self.battery.error()),
            (Subsystem::TimeMachine, self.timemachine.error()),
            (Subsystem::Network, self.network.error()),
            (Subsystem::Bluetooth, self.bluetooth.error()),
        ];
        errors
            .into_iter()
            .filter_map(|(subsystem, err)| err.map(|e| (subsystem, e)))
            .collect()
    }

    pub fn exit_code(&self) -> i32 {
        self.score.status.exit_code()
    }
}

/// Human-actionable explanation for a non-nominal subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub subsystem: Subsystem,
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    pub action: String,
}

/// A report together with its diagnoses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnoseReport {
    #[serde(flatten)]
    pub report: AggregateReport,
    pub diagnoses: Vec<Diagnosis>,
}

impl DiagnoseReport {
    pub fn exit_code(&self) -> i32 {
        self.report.exit_code()
    }
}
