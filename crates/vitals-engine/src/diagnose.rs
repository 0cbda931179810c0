// Diagnosis generation
// One explanation per non-nominal subsystem, in declaration order

use vitals_types::{
    AggregateReport, BatteryRecord, BluetoothRecord, CpuRecord, DiagnoseReport, Diagnosis,
    DiskRecord, ICloudRecord, MemoryRecord, NetworkRecord, Severity, Subsystem, ThermalRecord,
    TimeMachineRecord,
};

/// Peripheral battery level below which a device is named in the diagnosis.
const LOW_PERIPHERAL_BATTERY: u32 = 20;

/// Explain every subsystem that is not nominal.
pub fn diagnose(report: &AggregateReport) -> Vec<Diagnosis> {
    Subsystem::ALL
        .into_iter()
        .filter_map(|subsystem| match subsystem {
            Subsystem::Cpu => diagnose_cpu(&report.cpu),
            Subsystem::Memory => diagnose_memory(&report.memory),
            Subsystem::Disk => diagnose_disk(&report.disk),
            Subsystem::Thermal => diagnose_thermal(&report.thermal),
            Subsystem::ICloud => diagnose_icloud(&report.icloud),
            Subsystem::Battery => diagnose_battery(&report.battery),
            Subsystem::TimeMachine => diagnose_timemachine(&report.timemachine),
            Subsystem::Network => diagnose_network(&report.network),
            Subsystem::Bluetooth => diagnose_bluetooth(&report.bluetooth),
        })
        .collect()
}

/// Attach diagnoses to a finished report.
pub fn diagnose_report(report: AggregateReport) -> DiagnoseReport {
    let diagnoses = diagnose(&report);
    DiagnoseReport { report, diagnoses }
}

fn diagnosis(
    subsystem: Subsystem,
    severity: Severity,
    summary: &str,
    detail: String,
    action: &str,
) -> Option<Diagnosis> {
    Some(Diagnosis {
        subsystem,
        severity,
        summary: summary.to_string(),
        detail,
        action: action.to_string(),
    })
}

fn diagnose_cpu(cpu: &CpuRecord) -> Option<Diagnosis> {
    let load = format!(
        "Load per core is {:.2} (1m avg: {:.2} across {} cores).",
        cpu.load_per_core, cpu.load_avg_1m, cpu.logical_cores
    );
    match cpu.status {
        Severity::Nominal => None,
        Severity::Critical => diagnosis(
            Subsystem::Cpu,
            Severity::Critical,
            "CPU is heavily loaded",
            format!("{} System may be unresponsive.", load),
            "Find runaway processes in Activity Monitor and defer heavy tasks",
        ),
        Severity::Degraded => diagnosis(
            Subsystem::Cpu,
            Severity::Degraded,
            "CPU load is elevated",
            load,
            "Monitor load, it may settle. Avoid launching additional compute-heavy tasks",
        ),
    }
}

fn diagnose_memory(memory: &MemoryRecord) -> Option<Diagnosis> {
    let Some(free) = memory.pressure_percent else {
        return (!memory.status.is_nominal()).then(|| Diagnosis {
            subsystem: Subsystem::Memory,
            severity: memory.status,
            summary: "Memory pressure could not be determined".to_string(),
            detail: memory
                .error
                .clone()
                .unwrap_or_else(|| "The kernel memory level was not reported.".to_string()),
            action: "Check Memory Pressure in Activity Monitor".to_string(),
        });
    };

    let detail = format!("{}% memory free. Swap used: {:.1} MB.", free, memory.swap_used_mb);
    match memory.status {
        Severity::Nominal => None,
        Severity::Critical => diagnosis(
            Subsystem::Memory,
            Severity::Critical,
            "System is under critical memory pressure",
            format!("Only {}", detail),
            "Close memory-intensive applications immediately",
        ),
        Severity::Degraded => diagnosis(
            Subsystem::Memory,
            Severity::Degraded,
            "Memory pressure is elevated",
            detail,
            "Consider closing unused applications before launching heavy tasks",
        ),
    }
}

fn diagnose_disk(disk: &DiskRecord) -> Option<Diagnosis> {
    if disk.available_percent().is_none() {
        return (!disk.status.is_nominal()).then(|| Diagnosis {
            subsystem: Subsystem::Disk,
            severity: disk.status,
            summary: "Disk capacity could not be determined".to_string(),
            detail: disk
                .error
                .clone()
                .unwrap_or_else(|| "Neither diskutil nor df reported a capacity.".to_string()),
            action: "Check storage in System Settings > General > Storage".to_string(),
        });
    }

    let detail = format!(
        "{:.1} GB available of {:.1} GB ({:.1}% used).",
        disk.available_gb, disk.total_gb, disk.used_percent
    );
    match disk.status {
        Severity::Nominal => None,
        Severity::Critical => diagnosis(
            Subsystem::Disk,
            Severity::Critical,
            "Disk space critically low",
            format!("Only {}", detail),
            "Free disk space immediately: remove large unused files, empty the trash, clear caches",
        ),
        Severity::Degraded => diagnosis(
            Subsystem::Disk,
            Severity::Degraded,
            "Disk space is getting low",
            detail,
            "Look for cleanup opportunities before the disk fills up",
        ),
    }
}

fn diagnose_thermal(thermal: &ThermalRecord) -> Option<Diagnosis> {
    let detail = format!("CPU speed limited to {}% of maximum.", thermal.cpu_speed_limit);
    match thermal.status {
        Severity::Nominal => None,
        Severity::Critical => diagnosis(
            Subsystem::Thermal,
            Severity::Critical,
            "CPU is severely thermally throttled",
            detail,
            "Reduce workload, improve ventilation, or wait for the system to cool down",
        ),
        Severity::Degraded => diagnosis(
            Subsystem::Thermal,
            Severity::Degraded,
            "CPU is being thermally throttled",
            detail,
            "Monitor thermal state. Avoid launching additional compute-heavy tasks",
        ),
    }
}

fn diagnose_icloud(icloud: &ICloudRecord) -> Option<Diagnosis> {
    if icloud.status.is_nominal() {
        return None;
    }
    let mut detail = "CloudDocs container is not caught up.".to_string();
    if let Some(last_sync) = &icloud.last_sync {
        detail.push_str(&format!(" Last sync: {}.", last_sync));
    }
    diagnosis(
        Subsystem::ICloud,
        icloud.status,
        "iCloud Drive is actively syncing",
        detail,
        "Wait for sync to complete, or pause iCloud Drive in System Settings > Apple Account > iCloud",
    )
}

fn diagnose_battery(battery: &BatteryRecord) -> Option<Diagnosis> {
    let level = battery
        .percent
        .map_or_else(|| "unknown".to_string(), |p| format!("{}%", p));
    let detail = format!("Battery at {} on battery power.", level);

    match battery.status {
        Severity::Nominal => None,
        Severity::Critical => diagnosis(
            Subsystem::Battery,
            Severity::Critical,
            "Battery critically low",
            detail,
            "Connect to power immediately. System may shut down unexpectedly",
        ),
        Severity::Degraded => {
            let detail = match battery.time_remaining_min.filter(|m| *m > 0) {
                Some(minutes) => format!("{} Estimated {} minutes remaining.", detail, minutes),
                None => detail,
            };
            diagnosis(
                Subsystem::Battery,
                Severity::Degraded,
                "Battery is low",
                detail,
                "Connect to power before starting long-running tasks",
            )
        }
    }
}

fn diagnose_timemachine(backup: &TimeMachineRecord) -> Option<Diagnosis> {
    if backup.status.is_nominal() {
        return None;
    }
    let mut detail = "A Time Machine backup is running".to_string();
    if let Some(phase) = &backup.phase {
        detail.push_str(&format!(" (phase: {})", phase));
    }
    if let Some(percent) = backup.percent {
        detail.push_str(&format!(", {:.0}% complete", percent));
    }
    detail.push_str(". This may cause elevated disk I/O.");

    diagnosis(
        Subsystem::TimeMachine,
        backup.status,
        "Time Machine backup in progress",
        detail,
        "Wait for backup to complete or defer heavy disk I/O tasks",
    )
}

fn diagnose_network(network: &NetworkRecord) -> Option<Diagnosis> {
    if network.status.is_nominal() {
        return None;
    }
    let detail = match &network.error {
        Some(err) => format!("Network state could not be read: {}.", err),
        None => "No active network interface with reachability detected.".to_string(),
    };
    diagnosis(
        Subsystem::Network,
        network.status,
        "Network is unreachable",
        detail,
        "Check the Wi-Fi or Ethernet connection",
    )
}

fn diagnose_bluetooth(bluetooth: &BluetoothRecord) -> Option<Diagnosis> {
    if bluetooth.status.is_nominal() {
        return None;
    }

    let low: Vec<String> = bluetooth
        .connected_devices()
        .filter_map(|device| {
            device
                .battery_percent
                .filter(|p| *p <= LOW_PERIPHERAL_BATTERY)
                .map(|p| format!("{} ({}%)", device.name, p))
        })
        .collect();

    let detail = if low.is_empty() {
        bluetooth
            .error
            .clone()
            .unwrap_or_else(|| "A connected device reported a low battery.".to_string())
    } else {
        format!("Low battery on connected devices: {}.", low.join(", "))
    };

    diagnosis(
        Subsystem::Bluetooth,
        bluetooth.status.capped_at(Subsystem::Bluetooth.severity_cap()),
        "Bluetooth peripheral battery is low",
        detail,
        "Charge or replace the batteries of the listed devices",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_types::{BluetoothDevice, CompositeScore, PowerSource};

    fn nominal_report() -> AggregateReport {
        AggregateReport {
            timestamp: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
            score: CompositeScore {
                status: Severity::Nominal,
                value: 100,
                reasons: vec![],
            },
            cpu: CpuRecord::default(),
            memory: MemoryRecord {
                pressure_percent: Some(60),
                ..MemoryRecord::default()
            },
            disk: DiskRecord {
                available_gb: 400.0,
                total_gb: 1000.0,
                used_percent: 60.0,
                ..DiskRecord::default()
            },
            thermal: ThermalRecord::default(),
            icloud: ICloudRecord::default(),
            battery: BatteryRecord::default(),
            timemachine: TimeMachineRecord::default(),
            network: NetworkRecord {
                reachable: true,
                ..NetworkRecord::default()
            },
            bluetooth: BluetoothRecord::default(),
        }
    }

    #[test]
    fn test_nominal_report_has_no_diagnoses() {
        assert!(diagnose(&nominal_report()).is_empty());
    }

    #[test]
    fn test_diagnoses_follow_declaration_order() {
        let mut report = nominal_report();
        report.network.status = Severity::Critical;
        report.cpu.status = Severity::Degraded;
        report.timemachine.status = Severity::Degraded;
        report.timemachine.running = true;

        let subsystems: Vec<Subsystem> = diagnose(&report).iter().map(|d| d.subsystem).collect();
        assert_eq!(
            subsystems,
            [Subsystem::Cpu, Subsystem::TimeMachine, Subsystem::Network]
        );
    }

    #[test]
    fn test_cpu_wording_is_tiered() {
        let mut cpu = CpuRecord {
            load_avg_1m: 24.1,
            logical_cores: 10,
            load_per_core: 2.41,
            status: Severity::Critical,
            ..CpuRecord::default()
        };
        let critical = diagnose_cpu(&cpu).unwrap();
        assert_eq!(critical.summary, "CPU is heavily loaded");
        assert_eq!(
            critical.detail,
            "Load per core is 2.41 (1m avg: 24.10 across 10 cores). System may be unresponsive."
        );

        cpu.status = Severity::Degraded;
        assert_eq!(diagnose_cpu(&cpu).unwrap().summary, "CPU load is elevated");
    }

    #[test]
    fn test_unknown_memory_is_explained() {
        let memory = MemoryRecord {
            status: Severity::Degraded,
            error: Some("failed to get memory pressure: sysctl exited with status 1".to_string()),
            ..MemoryRecord::default()
        };
        let diagnosis = diagnose_memory(&memory).unwrap();
        assert_eq!(diagnosis.summary, "Memory pressure could not be determined");
        assert!(diagnosis.detail.contains("sysctl"));
    }

    #[test]
    fn test_battery_detail_mentions_time_remaining() {
        let battery = BatteryRecord {
            status: Severity::Degraded,
            installed: true,
            percent: Some(18),
            power_source: PowerSource::Battery,
            time_remaining_min: Some(42),
            ..BatteryRecord::default()
        };
        assert_eq!(
            diagnose_battery(&battery).unwrap().detail,
            "Battery at 18% on battery power. Estimated 42 minutes remaining."
        );
    }

    #[test]
    fn test_timemachine_detail() {
        let backup = TimeMachineRecord {
            status: Severity::Degraded,
            running: true,
            phase: Some("Copying".to_string()),
            percent: Some(45.0),
            ..TimeMachineRecord::default()
        };
        insta::assert_snapshot!(
            diagnose_timemachine(&backup).unwrap().detail,
            @"A Time Machine backup is running (phase: Copying), 45% complete. This may cause elevated disk I/O."
        );
    }

    #[test]
    fn test_bluetooth_names_low_devices() {
        let mut mouse = BluetoothDevice::new("Magic Mouse", true);
        mouse.record_battery(6);
        let mut pods = BluetoothDevice::new("AirPods Pro", true);
        pods.record_battery(91);

        let bluetooth = BluetoothRecord {
            status: Severity::Degraded,
            available: true,
            enabled: true,
            connected_device_count: 2,
            devices: vec![mouse, pods],
            ..BluetoothRecord::default()
        };
        let diagnosis = diagnose_bluetooth(&bluetooth).unwrap();
        assert_eq!(diagnosis.severity, Severity::Degraded);
        assert_eq!(diagnosis.detail, "Low battery on connected devices: Magic Mouse (6%).");
    }

    #[test]
    fn test_injected_bluetooth_critical_is_reported_as_degraded() {
        let bluetooth = BluetoothRecord {
            status: Severity::Critical,
            ..BluetoothRecord::default()
        };
        assert_eq!(
            diagnose_bluetooth(&bluetooth).unwrap().severity,
            Severity::Degraded
        );
    }
}
