use vitals_types::BluetoothDevice;

use super::{DeviceList, apply_battery, device_name, indent_of};

const SECTION_MAX_INDENT: usize = 8;
const DEVICE_INDENT: std::ops::RangeInclusive<usize> = 9..=13;
const PROPERTY_MIN_INDENT: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Connected,
    NotConnected,
    /// Controller block or anything else we do not read devices from.
    Other,
}

/// Devices under the top-level `Connected:` / `Not Connected:` headers.
///
/// ```text
///       Connected:                       <- section, indent <= 8
///           AirPods Pro:                 <- device, indent 9..=13
///               Left Battery Level: 88%  <- property, indent >= 14
/// ```
pub(super) fn parse(lines: &[&str]) -> Vec<BluetoothDevice> {
    let mut section = Section::Other;
    let mut devices = DeviceList::default();

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let indent = indent_of(line);

        if indent <= SECTION_MAX_INDENT && trimmed.ends_with(':') {
            devices.flush();
            section = match trimmed {
                "Connected:" => Section::Connected,
                "Not Connected:" => Section::NotConnected,
                _ => Section::Other,
            };
            continue;
        }
        if section == Section::Other {
            continue;
        }

        if DEVICE_INDENT.contains(&indent) {
            if let Some(name) = device_name(trimmed) {
                devices.start(name, section == Section::Connected);
                continue;
            }
        }

        if indent >= PROPERTY_MIN_INDENT {
            if let Some(device) = devices.current_mut() {
                apply_battery(line, device);
            }
        }
    }

    devices.finish()
}
