use std::sync::LazyLock;

use regex::Regex;
use vitals_types::{BatteryRecord, PowerSource};

use crate::classify;
use crate::commands::{IOREG_BATTERY, PMSET_BATT};
use crate::runner::{CommandRunner, capture};
use crate::traits::Probe;

static POWER_SOURCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Now drawing from '([^']+)'").unwrap());
static BATTERY_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)%;\s*(\w[\w\s]*)").unwrap());
static TIME_REMAINING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+):(\d+) remaining").unwrap());

static INSTALLED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""BatteryInstalled"\s*=\s*(\w+)"#).unwrap());
static CYCLE_COUNT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""CycleCount"\s*=\s*(\d+)"#).unwrap());
static DESIGN_CAPACITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""DesignCapacity"\s*=\s*(\d+)"#).unwrap());
static NOMINAL_CAPACITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""NominalChargeCapacity"\s*=\s*(\d+)"#).unwrap());
static CURRENT_CAPACITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""CurrentCapacity"\s*=\s*(\d+)"#).unwrap());

/// Internal battery charge and power source.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatteryProbe;

impl Probe for BatteryProbe {
    type Record = BatteryRecord;

    fn collect(&self, runner: &dyn CommandRunner) -> BatteryRecord {
        let out = match capture(runner, &PMSET_BATT) {
            Ok(out) => out,
            Err(err) => {
                return self.unavailable(format!("failed to read battery state: {}", err));
            }
        };

        let mut record = BatteryRecord::default();
        apply_pmset(&out, &mut record);

        // ioreg only refines what pmset reported.
        if let Ok(out) = capture(runner, &IOREG_BATTERY) {
            apply_ioreg(&out, &mut record);
        }

        if !record.installed {
            record.power_source = PowerSource::Ac;
        }
        record.status = classify::battery(&record);
        record
    }

    fn unavailable(&self, error: String) -> BatteryRecord {
        BatteryRecord {
            error: Some(error),
            power_source: PowerSource::Ac,
            ..BatteryRecord::default()
        }
    }
}

/// Fold `pmset -g batt` output into `record`.
pub fn apply_pmset(raw: &str, record: &mut BatteryRecord) {
    if let Some(caps) = POWER_SOURCE_REGEX.captures(raw) {
        record.power_source = if caps[1].contains("AC") {
            PowerSource::Ac
        } else {
            PowerSource::Battery
        };
    }

    if let Some(caps) = BATTERY_LINE_REGEX.captures(raw) {
        record.percent = caps[1].parse().ok();
        record.installed = true;

        let state = caps[2].trim();
        if state == "charging" || state == "finishing charge" {
            record.charging = true;
        } else if state.contains("charged") {
            record.fully_charged = true;
        }
    }

    if let Some(caps) = TIME_REMAINING_REGEX.captures(raw) {
        let hours: u32 = caps[1].parse().unwrap_or(0);
        let minutes: u32 = caps[2].parse().unwrap_or(0);
        record.time_remaining_min = Some(hours.saturating_mul(60).saturating_add(minutes));
    }
}

/// Fold `ioreg -r -c AppleSmartBattery` properties into `record`.
///
/// An explicit `BatteryInstalled` wins over pmset; the remaining properties
/// are only read for an installed battery.
pub fn apply_ioreg(raw: &str, record: &mut BatteryRecord) {
    if let Some(caps) = INSTALLED_REGEX.captures(raw) {
        let value = &caps[1];
        record.installed = value.eq_ignore_ascii_case("yes") || value.eq_ignore_ascii_case("true");
    }
    if !record.installed {
        return;
    }

    if let Some(cycles) = capture_u32(&CYCLE_COUNT_REGEX, raw) {
        record.cycle_count = Some(cycles);
    }

    let design = capture_u32(&DESIGN_CAPACITY_REGEX, raw).filter(|c| *c > 0);
    let nominal = capture_u32(&NOMINAL_CAPACITY_REGEX, raw).filter(|c| *c > 0);
    if let (Some(design), Some(nominal)) = (design, nominal) {
        record.health_percent = Some(f64::from(nominal) / f64::from(design) * 100.0);
    }

    // Intel models report CurrentCapacity in mAh rather than percent.
    if let Some(current) = capture_u32(&CURRENT_CAPACITY_REGEX, raw).filter(|c| *c <= 100) {
        record.percent = Some(current);
    }
}

fn capture_u32(pattern: &Regex, raw: &str) -> Option<u32> {
    pattern.captures(raw).and_then(|caps| caps[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pmset(raw: &str) -> BatteryRecord {
        let mut record = BatteryRecord::default();
        apply_pmset(raw, &mut record);
        record
    }

    #[test]
    fn test_pmset_ac_fully_charged() {
        let record = pmset(
            "Now drawing from 'AC Power'\n -InternalBattery-0 (id=21168227)\t100%; charged; 0:00 remaining present: true\n",
        );
        assert_eq!(record.power_source, PowerSource::Ac);
        assert_eq!(record.percent, Some(100));
        assert!(record.installed);
        assert!(record.fully_charged);
        assert!(!record.charging);
        assert_eq!(record.time_remaining_min, Some(0));
    }

    #[test]
    fn test_pmset_discharging() {
        let record = pmset(
            "Now drawing from 'Battery Power'\n -InternalBattery-0 (id=21168227)\t75%; discharging; 3:45 remaining present: true\n",
        );
        assert_eq!(record.power_source, PowerSource::Battery);
        assert_eq!(record.percent, Some(75));
        assert!(!record.charging);
        assert!(!record.fully_charged);
        assert_eq!(record.time_remaining_min, Some(225));
    }

    #[test]
    fn test_pmset_charging_states() {
        let charging = pmset("Now drawing from 'AC Power'\n -InternalBattery-0\t45%; charging; 1:30 remaining");
        assert!(charging.charging);

        let finishing = pmset("Now drawing from 'AC Power'\n -InternalBattery-0\t99%; finishing charge; present: true");
        assert!(finishing.charging);
        assert!(!finishing.fully_charged);

        let held = pmset("Now drawing from 'AC Power'\n -InternalBattery-0\t80%; not charging; present: true");
        assert!(!held.charging);
        assert!(!held.fully_charged);
        assert_eq!(held.time_remaining_min, None);
    }

    #[test]
    fn test_pmset_huge_time_remaining_saturates() {
        let record = pmset(
            "Now drawing from 'Battery Power'\n -InternalBattery-0\t50%; discharging; 99999999:00 remaining present: true\n",
        );
        assert_eq!(record.percent, Some(50));
        assert_eq!(record.time_remaining_min, Some(u32::MAX));
    }

    #[test]
    fn test_pmset_desktop_has_no_battery_line() {
        let record = pmset("Now drawing from 'AC Power'\n");
        assert!(!record.installed);
        assert_eq!(record.percent, None);
    }

    #[test]
    fn test_ioreg_installed_battery() {
        let raw = "\"BatteryInstalled\" = Yes\n\"CycleCount\" = 351\n\"DesignCapacity\" = 6075\n\"NominalChargeCapacity\" = 5225\n\"CurrentCapacity\" = 100\n";
        let mut record = BatteryRecord::default();
        apply_ioreg(raw, &mut record);

        assert!(record.installed);
        assert_eq!(record.cycle_count, Some(351));
        assert_eq!(record.percent, Some(100));
        let health = record.health_percent.unwrap();
        assert!((health - 5225.0 / 6075.0 * 100.0).abs() < 0.01);
    }

    #[test]
    fn test_ioreg_capacity_in_mah_keeps_pmset_percent() {
        let raw = "\"BatteryInstalled\" = Yes\n\"DesignCapacity\" = 5770\n\"NominalChargeCapacity\" = 5100\n\"CurrentCapacity\" = 4500\n";
        let mut record = BatteryRecord {
            installed: true,
            percent: Some(8),
            power_source: PowerSource::Battery,
            ..BatteryRecord::default()
        };
        apply_ioreg(raw, &mut record);

        assert_eq!(record.percent, Some(8));
        assert_eq!(classify::battery(&record), vitals_types::Severity::Critical);
    }

    #[test]
    fn test_ioreg_not_installed_skips_properties() {
        let mut record = BatteryRecord {
            installed: true,
            percent: Some(40),
            ..BatteryRecord::default()
        };
        apply_ioreg("\"BatteryInstalled\" = No\n\"CycleCount\" = 12\n", &mut record);

        assert!(!record.installed);
        assert_eq!(record.cycle_count, None);
        assert_eq!(record.percent, Some(40));
    }
}
