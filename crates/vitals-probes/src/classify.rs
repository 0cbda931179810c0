//! Fixed-threshold severity rules, one per subsystem.
//!
//! Thresholds are deliberately not configurable.

use vitals_types::{BatteryRecord, BluetoothRecord, PowerSource, Severity, Subsystem};

const CPU_LOAD_PER_CORE_CRITICAL: f64 = 2.0;
const CPU_LOAD_PER_CORE_DEGRADED: f64 = 0.8;

const MEMORY_FREE_CRITICAL: u32 = 10;
const MEMORY_FREE_DEGRADED: u32 = 25;

const DISK_FREE_CRITICAL: f64 = 10.0;
const DISK_FREE_DEGRADED: f64 = 20.0;

const THERMAL_LIMIT_CRITICAL: u32 = 80;
const THERMAL_LIMIT_DEGRADED: u32 = 100;

const BATTERY_CRITICAL: u32 = 10;
const BATTERY_DEGRADED: u32 = 20;

const PERIPHERAL_BATTERY_CRITICAL: u32 = 10;
const PERIPHERAL_BATTERY_DEGRADED: u32 = 20;

pub fn cpu(load_per_core: f64) -> Severity {
    if load_per_core >= CPU_LOAD_PER_CORE_CRITICAL {
        Severity::Critical
    } else if load_per_core >= CPU_LOAD_PER_CORE_DEGRADED {
        Severity::Degraded
    } else {
        Severity::Nominal
    }
}

/// `free_percent` is the kernel's free-memory level. An unknown level is
/// degraded: there is no evidence either way.
pub fn memory(free_percent: Option<u32>) -> Severity {
    match free_percent {
        Some(p) if p <= MEMORY_FREE_CRITICAL => Severity::Critical,
        Some(p) if p <= MEMORY_FREE_DEGRADED => Severity::Degraded,
        Some(_) => Severity::Nominal,
        None => Severity::Degraded,
    }
}

/// An unknown capacity is degraded for the same reason as memory.
pub fn disk(available_percent: Option<f64>) -> Severity {
    match available_percent {
        Some(p) if p <= DISK_FREE_CRITICAL => Severity::Critical,
        Some(p) if p <= DISK_FREE_DEGRADED => Severity::Degraded,
        Some(_) => Severity::Nominal,
        None => Severity::Degraded,
    }
}

pub fn thermal(cpu_speed_limit: u32) -> Severity {
    if cpu_speed_limit < THERMAL_LIMIT_CRITICAL {
        Severity::Critical
    } else if cpu_speed_limit < THERMAL_LIMIT_DEGRADED {
        Severity::Degraded
    } else {
        Severity::Nominal
    }
}

/// Only a machine running on battery power can be degraded.
pub fn battery(record: &BatteryRecord) -> Severity {
    if !record.installed || record.power_source == PowerSource::Ac {
        return Severity::Nominal;
    }
    match record.percent {
        Some(p) if p <= BATTERY_CRITICAL => Severity::Critical,
        Some(p) if p <= BATTERY_DEGRADED => Severity::Degraded,
        _ => Severity::Nominal,
    }
}

pub fn icloud(caught_up: bool) -> Severity {
    if caught_up {
        Severity::Nominal
    } else {
        Severity::Degraded
    }
}

/// A running backup is worth knowing about but is never critical.
pub fn timemachine(running: bool) -> Severity {
    if running {
        Severity::Degraded
    } else {
        Severity::Nominal
    }
}

pub fn network(reachable: bool) -> Severity {
    if reachable {
        Severity::Nominal
    } else {
        Severity::Critical
    }
}

/// Rates the lowest battery among connected peripherals, capped at degraded.
pub fn bluetooth(record: &BluetoothRecord) -> Severity {
    let lowest = record
        .connected_devices()
        .filter_map(|device| device.battery_percent)
        .min();

    let severity = match lowest {
        Some(p) if p <= PERIPHERAL_BATTERY_CRITICAL => Severity::Critical,
        Some(p) if p <= PERIPHERAL_BATTERY_DEGRADED => Severity::Degraded,
        _ => Severity::Nominal,
    };
    severity.capped_at(Subsystem::Bluetooth.severity_cap())
}
