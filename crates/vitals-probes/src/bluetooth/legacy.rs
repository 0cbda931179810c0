use std::sync::LazyLock;

use regex::Regex;
use vitals_types::BluetoothDevice;

use super::{DeviceList, apply_battery, device_name, indent_of};

const HEADER_MAX_INDENT: usize = 6;
const DEVICE_INDENT: std::ops::RangeInclusive<usize> = 8..=12;

static CONNECTED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s+Connected:\s*(Yes|No)\s*$").unwrap());

/// Devices inside the `Devices (Paired, Configured, etc.):` block.
///
/// The block ends at the next header at indent <= 6. Property lines only
/// count when indented deeper than the device they follow.
pub(super) fn parse(lines: &[&str]) -> Vec<BluetoothDevice> {
    let mut in_devices = false;
    let mut device_indent = 0;
    let mut devices = DeviceList::default();

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let indent = indent_of(line);

        if trimmed.starts_with("Devices (") {
            in_devices = true;
            continue;
        }
        if !in_devices {
            continue;
        }

        if indent <= HEADER_MAX_INDENT && trimmed.ends_with(':') {
            break;
        }

        if DEVICE_INDENT.contains(&indent) {
            if let Some(name) = device_name(trimmed) {
                devices.start(name, false);
                device_indent = indent;
                continue;
            }
        }

        if indent <= device_indent {
            continue;
        }
        if let Some(device) = devices.current_mut() {
            if let Some(caps) = CONNECTED_REGEX.captures(line) {
                device.connected = caps[1].eq_ignore_ascii_case("yes");
            }
            apply_battery(line, device);
        }
    }

    devices.finish()
}
