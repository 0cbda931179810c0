//! Bluetooth controller state and paired peripherals.
//!
//! `system_profiler SPBluetoothDataType` has shipped two report layouts:
//!
//! - **Modern**: `State: On` in the controller block, then top-level
//!   `Connected:` / `Not Connected:` sections; section membership decides
//!   connectivity.
//! - **Legacy**: `Bluetooth Power: On`, then one `Devices (Paired, ...)`
//!   block where each device carries a `Connected: Yes|No` property.
//!
//! Both are parsed by indentation. Neither layout being recognisable is not
//! an error; the record simply lists no devices.

mod legacy;
mod modern;

use std::sync::LazyLock;

use regex::Regex;
use vitals_types::{BluetoothDevice, BluetoothLayout, BluetoothRecord};

use crate::classify;
use crate::commands::SYSTEM_PROFILER_BLUETOOTH;
use crate::runner::{CommandRunner, capture};
use crate::traits::Probe;

static STATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s+State:\s*(On|Off)\s*$").unwrap());
static POWER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s+Bluetooth Power:\s*(On|Off)\s*$").unwrap());

/// Every battery key macOS has used for peripherals, including the
/// per-bud and case readings of earbuds.
static BATTERY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:Device batteryPercent|Battery Level|Left Battery Level|Right Battery Level|Case Battery Level):\s*(\d+)%",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct BluetoothProbe;

impl Probe for BluetoothProbe {
    type Record = BluetoothRecord;

    fn collect(&self, runner: &dyn CommandRunner) -> BluetoothRecord {
        let out = match capture(runner, &SYSTEM_PROFILER_BLUETOOTH) {
            Ok(out) => out,
            Err(err) => {
                return self.unavailable(format!("failed to read bluetooth state: {}", err));
            }
        };

        let mut record = parse_bluetooth(&out);
        record.status = classify::bluetooth(&record);
        record
    }

    fn unavailable(&self, error: String) -> BluetoothRecord {
        BluetoothRecord {
            available: false,
            error: Some(error),
            ..BluetoothRecord::default()
        }
    }
}

/// Unclassified record from a `system_profiler SPBluetoothDataType` report.
pub fn parse_bluetooth(raw: &str) -> BluetoothRecord {
    let lines: Vec<&str> = raw.lines().collect();

    let mut record = BluetoothRecord {
        available: true,
        enabled: detect_power(&lines),
        layout: detect_layout(&lines),
        ..BluetoothRecord::default()
    };
    if !record.enabled {
        return record;
    }

    let devices = match record.layout {
        BluetoothLayout::Modern => modern::parse(&lines),
        BluetoothLayout::Legacy => legacy::parse(&lines),
        BluetoothLayout::Unknown => Vec::new(),
    };
    record.connected_device_count = devices.iter().filter(|d| d.connected).count() as u32;
    record.devices = devices;
    record
}

/// First `State:` or `Bluetooth Power:` line wins.
fn detect_power(lines: &[&str]) -> bool {
    lines
        .iter()
        .find_map(|line| {
            STATE_REGEX
                .captures(line)
                .or_else(|| POWER_REGEX.captures(line))
        })
        .is_some_and(|caps| caps[1].eq_ignore_ascii_case("on"))
}

fn detect_layout(lines: &[&str]) -> BluetoothLayout {
    let trimmed = || lines.iter().map(|line| line.trim());

    if trimmed().any(|line| line == "Connected:" || line == "Not Connected:") {
        BluetoothLayout::Modern
    } else if trimmed().any(|line| line.starts_with("Devices (")) {
        BluetoothLayout::Legacy
    } else {
        BluetoothLayout::Unknown
    }
}

/// Leading whitespace width, counting a tab as one column.
fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

/// `Name:` on its own line, as used for device headers.
fn device_name(trimmed: &str) -> Option<&str> {
    trimmed.strip_suffix(':')
}

/// Accumulates devices in first-seen order.
#[derive(Debug, Default)]
struct DeviceList {
    current: Option<BluetoothDevice>,
    devices: Vec<BluetoothDevice>,
}

impl DeviceList {
    fn start(&mut self, name: &str, connected: bool) {
        self.flush();
        self.current = Some(BluetoothDevice::new(name, connected));
    }

    fn current_mut(&mut self) -> Option<&mut BluetoothDevice> {
        self.current.as_mut()
    }

    /// Emit the open device, dropping it if it has no name.
    fn flush(&mut self) {
        if let Some(device) = self.current.take().filter(|d| !d.name.is_empty()) {
            self.devices.push(device);
        }
    }

    fn finish(mut self) -> Vec<BluetoothDevice> {
        self.flush();
        self.devices
    }
}

fn apply_battery(line: &str, device: &mut BluetoothDevice) {
    if let Some(percent) = BATTERY_REGEX
        .captures(line)
        .and_then(|caps| caps[1].parse().ok())
    {
        device.record_battery(percent);
    }
}
