// Probe behaviour against scripted command output: fallbacks, advisories,
// and classification end to end.
use vitals_probes::commands::{DF_ROOT, DISKUTIL_INFO, IOREG_BATTERY, LOAD_AVG, PMSET_BATT};
use vitals_probes::{
    BatteryProbe, BluetoothProbe, CpuProbe, DiskProbe, ICloudProbe, MemoryProbe, NetworkProbe,
    Probe, ThermalProbe, TimeMachineProbe,
};
use vitals_testing::StubRunner;
use vitals_testing::fixtures::{self, bare_machine, healthy_machine, stressed_machine};
use vitals_types::{BluetoothLayout, DiskSource, PowerSource, Severity, SubsystemRecord};

#[test]
fn test_healthy_machine_is_nominal_everywhere() {
    let runner = healthy_machine();

    assert_eq!(CpuProbe.collect(&runner).status(), Severity::Nominal);
    assert_eq!(MemoryProbe.collect(&runner).status(), Severity::Nominal);
    assert_eq!(DiskProbe.collect(&runner).status(), Severity::Nominal);
    assert_eq!(ThermalProbe.collect(&runner).status(), Severity::Nominal);
    assert_eq!(ICloudProbe.collect(&runner).status(), Severity::Nominal);
    assert_eq!(BatteryProbe.collect(&runner).status(), Severity::Nominal);
    assert_eq!(TimeMachineProbe.collect(&runner).status(), Severity::Nominal);
    assert_eq!(NetworkProbe.collect(&runner).status(), Severity::Nominal);
    assert_eq!(BluetoothProbe.collect(&runner).status(), Severity::Nominal);
}

#[test]
fn test_cpu_load_per_core() {
    let record = CpuProbe.collect(&healthy_machine());
    assert_eq!(record.logical_cores, 10);
    assert!((record.load_per_core - 0.152).abs() < 1e-9);
    assert_eq!(record.error, None);

    let record = CpuProbe.collect(&stressed_machine());
    assert_eq!(record.status, Severity::Critical);
}

#[test]
fn test_cpu_without_core_count_divides_by_one() {
    let runner = StubRunner::new().with_output(LOAD_AVG, "{ 0.90 0.50 0.40 }");
    let record = CpuProbe.collect(&runner);

    assert_eq!(record.logical_cores, 1);
    assert!((record.load_per_core - 0.9).abs() < 1e-9);
    assert_eq!(record.status, Severity::Degraded);
    assert!(record.error.unwrap().starts_with("failed to get cpu count"));
}

#[test]
fn test_disk_prefers_diskutil() {
    let runner = healthy_machine();
    let record = DiskProbe.collect(&runner);

    assert_eq!(record.source, Some(DiskSource::Diskutil));
    assert!(!runner.was_called(&DF_ROOT));
    assert!((record.used_percent + record.available_percent().unwrap() - 100.0).abs() < 1e-9);
}

#[test]
fn test_disk_falls_back_to_df() {
    let runner = stressed_machine();
    let record = DiskProbe.collect(&runner);

    assert!(runner.was_called(&DISKUTIL_INFO));
    assert!(runner.was_called(&DF_ROOT));
    assert_eq!(record.source, Some(DiskSource::Df));
    assert_eq!(record.status, Severity::Critical);
    assert_eq!(record.error, None);
}

#[test]
fn test_disk_falls_back_when_diskutil_reports_nothing() {
    let runner = StubRunner::new()
        .with_output(DISKUTIL_INFO, "   Volume Name: Macintosh HD\n")
        .with_output(DF_ROOT, fixtures::DF_ROOT);
    let record = DiskProbe.collect(&runner);

    assert_eq!(record.source, Some(DiskSource::Df));
    assert_eq!(record.status, Severity::Nominal);
}

#[test]
fn test_battery_low_on_battery_power() {
    let record = BatteryProbe.collect(&stressed_machine());

    assert!(record.installed);
    assert_eq!(record.power_source, PowerSource::Battery);
    assert_eq!(record.percent, Some(8));
    assert_eq!(record.time_remaining_min, Some(14));
    assert_eq!(record.status, Severity::Critical);
}

#[test]
fn test_battery_ioreg_refines_pmset() {
    let record = BatteryProbe.collect(&healthy_machine());

    assert_eq!(record.cycle_count, Some(351));
    assert!(record.health_percent.is_some());
    assert!(record.fully_charged);
}

#[test]
fn test_desktop_without_battery() {
    let runner = StubRunner::new()
        .with_output(PMSET_BATT, fixtures::PMSET_BATT_DESKTOP)
        .with_output(IOREG_BATTERY, "\"BatteryInstalled\" = No\n");
    let record = BatteryProbe.collect(&runner);

    assert!(!record.installed);
    assert_eq!(record.power_source, PowerSource::Ac);
    assert_eq!(record.status, Severity::Nominal);
}

#[test]
fn test_stressed_subsystems() {
    let runner = stressed_machine();

    assert_eq!(MemoryProbe.collect(&runner).status, Severity::Critical);
    assert_eq!(ThermalProbe.collect(&runner).cpu_speed_limit, 72);
    assert_eq!(ICloudProbe.collect(&runner).status, Severity::Degraded);
    assert_eq!(NetworkProbe.collect(&runner).status, Severity::Critical);

    let backup = TimeMachineProbe.collect(&runner);
    assert_eq!(backup.status, Severity::Degraded);
    assert_eq!(backup.phase.as_deref(), Some("Copying"));
    assert_eq!(backup.percent, Some(45.0));
}

#[test]
fn test_low_peripheral_is_only_degraded() {
    let record = BluetoothProbe.collect(&stressed_machine());

    assert_eq!(record.layout, BluetoothLayout::Modern);
    assert_eq!(record.connected_device_count, 1);
    assert_eq!(record.devices[0].battery_percent, Some(6));
    assert_eq!(record.status, Severity::Degraded);
}

#[test]
fn test_legacy_bluetooth_report() {
    let runner = StubRunner::new().with_output(
        vitals_probes::commands::SYSTEM_PROFILER_BLUETOOTH,
        fixtures::BLUETOOTH_LEGACY,
    );
    let record = BluetoothProbe.collect(&runner);

    assert_eq!(record.layout, BluetoothLayout::Legacy);
    assert_eq!(record.connected_device_count, 2);
    assert_eq!(record.status, Severity::Nominal);
}

#[test]
fn test_missing_utilities_fall_back_to_defaults() {
    let runner = bare_machine();

    let cpu = CpuProbe.collect(&runner);
    assert_eq!((cpu.status, cpu.logical_cores), (Severity::Nominal, 1));
    assert!(cpu.error.is_some());

    let memory = MemoryProbe.collect(&runner);
    assert_eq!((memory.status, memory.pressure_percent), (Severity::Degraded, None));

    let disk = DiskProbe.collect(&runner);
    assert_eq!((disk.status, disk.source), (Severity::Degraded, None));
    assert!(disk.error.is_some());

    let thermal = ThermalProbe.collect(&runner);
    assert_eq!((thermal.status, thermal.cpu_speed_limit), (Severity::Nominal, 100));

    let icloud = ICloudProbe.collect(&runner);
    assert!(icloud.caught_up);
    assert_eq!(icloud.status, Severity::Nominal);

    let battery = BatteryProbe.collect(&runner);
    assert!(!battery.installed);
    assert_eq!(battery.status, Severity::Nominal);

    let backup = TimeMachineProbe.collect(&runner);
    assert!(!backup.running);
    assert_eq!(backup.status, Severity::Nominal);

    let network = NetworkProbe.collect(&runner);
    assert_eq!(network.status, Severity::Critical);
    assert!(network.error.is_some());

    let bluetooth = BluetoothProbe.collect(&runner);
    assert!(!bluetooth.available);
    assert_eq!(bluetooth.status, Severity::Nominal);

    for error in [
        thermal.error,
        icloud.error,
        battery.error,
        backup.error,
        bluetooth.error,
    ] {
        assert!(error.is_some());
    }
}

#[test]
fn test_advisory_error_names_the_program() {
    let record = NetworkProbe.collect(&bare_machine());
    insta::assert_snapshot!(
        record.error.unwrap(),
        @"failed to check network: failed to run /usr/sbin/scutil: No such file or directory"
    );
}
