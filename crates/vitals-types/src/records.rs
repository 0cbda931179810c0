//! Canonical per-subsystem records.
//!
//! Every record carries a classified `status` and an optional advisory
//! `error`. Values a probe could not determine are `None`, never a zero that
//! would be mistaken for a measurement.

use serde::{Deserialize, Serialize};

use crate::{Severity, Subsystem};

/// Uniform view over the nine concrete records.
pub trait SubsystemRecord {
    const SUBSYSTEM: Subsystem;

    fn status(&self) -> Severity;

    /// Advisory error left by a probe that fell back to its default.
    fn error(&self) -> Option<&str>;

    fn subsystem(&self) -> Subsystem {
        Self::SUBSYSTEM
    }
}

macro_rules! impl_subsystem_record {
    ($record:ty, $subsystem:expr) => {
        impl SubsystemRecord for $record {
            const SUBSYSTEM: Subsystem = $subsystem;

            fn status(&self) -> Severity {
                self.status
            }

            fn error(&self) -> Option<&str> {
                self.error.as_deref()
            }
        }
    };
}

// --------------------------------------------------------
// CPU
// --------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuRecord {
    pub status: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub load_avg_1m: f64,
    pub load_avg_5m: f64,
    pub load_avg_15m: f64,
    /// Never zero; an unreadable core count falls back to 1.
    pub logical_cores: u32,
    pub load_per_core: f64,
}

impl Default for CpuRecord {
    fn default() -> Self {
        Self {
            status: Severity::Nominal,
            error: None,
            load_avg_1m: 0.0,
            load_avg_5m: 0.0,
            load_avg_15m: 0.0,
            logical_cores: 1,
            load_per_core: 0.0,
        }
    }
}

impl_subsystem_record!(CpuRecord, Subsystem::Cpu);

// --------------------------------------------------------
// Memory
// --------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub status: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Free-memory level reported by the kernel (0-100), if it could be read.
    #[serde(default)]
    pub pressure_percent: Option<u32>,
    pub swap_used_mb: f64,
    pub swap_total_mb: f64,
}

impl_subsystem_record!(MemoryRecord, Subsystem::Memory);

// --------------------------------------------------------
// Disk
// --------------------------------------------------------

/// Which utility supplied the capacity figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiskSource {
    Diskutil,
    Df,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskRecord {
    pub status: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub available_gb: f64,
    pub total_gb: f64,
    pub used_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<DiskSource>,
}

impl DiskRecord {
    /// Free space as a percentage of capacity; `None` when capacity is unknown.
    pub fn available_percent(&self) -> Option<f64> {
        (self.total_gb > 0.0).then(|| self.available_gb / self.total_gb * 100.0)
    }
}

impl_subsystem_record!(DiskRecord, Subsystem::Disk);

// --------------------------------------------------------
// Thermal
// --------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalRecord {
    pub status: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Percentage of maximum CPU speed currently allowed.
    pub cpu_speed_limit: u32,
    pub throttled: bool,
}

impl Default for ThermalRecord {
    fn default() -> Self {
        Self {
            status: Severity::Nominal,
            error: None,
            cpu_speed_limit: 100,
            throttled: false,
        }
    }
}

impl_subsystem_record!(ThermalRecord, Subsystem::Thermal);

// --------------------------------------------------------
// iCloud Drive
// --------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ICloudRecord {
    pub status: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub syncing: bool,
    pub caught_up: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<String>,
}

impl Default for ICloudRecord {
    fn default() -> Self {
        Self {
            status: Severity::Nominal,
            error: None,
            syncing: false,
            caught_up: true,
            last_sync: None,
        }
    }
}

impl_subsystem_record!(ICloudRecord, Subsystem::ICloud);

// --------------------------------------------------------
// Battery
// --------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerSource {
    Ac,
    Battery,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatteryRecord {
    pub status: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub installed: bool,
    #[serde(default)]
    pub percent: Option<u32>,
    pub power_source: PowerSource,
    pub charging: bool,
    pub fully_charged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_remaining_min: Option<u32>,
    /// Full-charge capacity relative to design capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_count: Option<u32>,
}

impl_subsystem_record!(BatteryRecord, Subsystem::Battery);

// --------------------------------------------------------
// Time Machine
// --------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeMachineRecord {
    pub status: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub running: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    /// Completion of the running session, 0-100.
    #[serde(default)]
    pub percent: Option<f64>,
}

impl_subsystem_record!(TimeMachineRecord, Subsystem::TimeMachine);

// --------------------------------------------------------
// Network
// --------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkRecord {
    pub status: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub reachable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl_subsystem_record!(NetworkRecord, Subsystem::Network);

// --------------------------------------------------------
// Bluetooth
// --------------------------------------------------------

/// Which `system_profiler` report layout the device list came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BluetoothLayout {
    /// Devices grouped under "Connected:" / "Not Connected:" headers.
    Modern,
    /// Flat "Devices (Paired, ...)" list with a per-device "Connected:" property.
    Legacy,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BluetoothDevice {
    pub name: String,
    pub connected: bool,
    /// Highest battery reading reported for the device; `None` when the
    /// device reports no battery at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_percent: Option<u32>,
}

impl BluetoothDevice {
    pub fn new(name: impl Into<String>, connected: bool) -> Self {
        Self {
            name: name.into(),
            connected,
            battery_percent: None,
        }
    }

    /// Fold another battery reading in, keeping the maximum.
    pub fn record_battery(&mut self, percent: u32) {
        self.battery_percent = Some(self.battery_percent.map_or(percent, |p| p.max(percent)));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BluetoothRecord {
    pub status: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub available: bool,
    pub enabled: bool,
    pub layout: BluetoothLayout,
    pub connected_device_count: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<BluetoothDevice>,
}

impl BluetoothRecord {
    pub fn connected_devices(&self) -> impl Iterator<Item = &BluetoothDevice> {
        self.devices.iter().filter(|d| d.connected)
    }
}

impl_subsystem_record!(BluetoothRecord, Subsystem::Bluetooth);
