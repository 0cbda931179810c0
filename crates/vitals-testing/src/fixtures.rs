//! Captured utility output and ready-made machines built from it.
//!
//! Each constant is the stdout of one command from `vitals_probes::commands`.

use vitals_probes::commands;

use crate::StubRunner;

pub const LOGICAL_CPU: &str = "10\n";
pub const LOAD_AVG_IDLE: &str = "{ 1.52 1.87 2.01 }\n";
pub const LOAD_AVG_SATURATED: &str = "{ 24.10 18.33 12.70 }\n";

pub const MEMORY_LEVEL_HEALTHY: &str = "62\n";
pub const MEMORY_LEVEL_CRITICAL: &str = "7\n";
pub const SWAP_USAGE: &str =
    "vm.swapusage: total = 2048.00M  used = 1034.25M  free = 1013.75M  (encrypted)\n";

pub const DISKUTIL_INFO: &str = "   Device Identifier:         disk3s1s1
   Device Node:               /dev/disk3s1s1
   Whole:                     No
   Part of Whole:             disk3

   Volume Name:               Macintosh HD
   Mounted:                   Yes
   Mount Point:               /

   File System Personality:   APFS
   Type (Bundle):             apfs

   Container Total Space:     994.7 GB (994662584320 Bytes) (exactly 1942700360 512-Byte-Units)
   Container Free Space:      465.8 GB (465804609536 Bytes) (exactly 909774628 512-Byte-Units)
";

pub const DF_ROOT: &str = "Filesystem     512-blocks      Used Available Capacity  Mounted on
/dev/disk3s1s1 1942700360 1032925732 909774628    53%    /
";

pub const DF_ROOT_NEARLY_FULL: &str = "Filesystem     512-blocks       Used Available Capacity  Mounted on
/dev/disk3s1s1 1942700360 1846000000  96700360    95%    /
";

pub const PMSET_THERM_NOMINAL: &str = "Note: No thermal warning level has been recorded
Note: No performance warning level has been recorded
Note: No CPU power status has been recorded
";

pub const PMSET_THERM_THROTTLED: &str = "CPU Power notify
\tCPU_Scheduler_Limit \t= 100
\tCPU_Available_CPUs \t= 10
\tCPU_Speed_Limit \t= 72
";

pub const PMSET_BATT_AC: &str = "Now drawing from 'AC Power'
 -InternalBattery-0 (id=21168227)\t100%; charged; 0:00 remaining present: true
";

pub const PMSET_BATT_LOW: &str = "Now drawing from 'Battery Power'
 -InternalBattery-0 (id=21168227)\t8%; discharging; 0:14 remaining present: true
";

pub const PMSET_BATT_DESKTOP: &str = "Now drawing from 'AC Power'\n";

pub const IOREG_BATTERY: &str = "+-o AppleSmartBattery  <class AppleSmartBattery, id 0x1000003b5, registered, matched, active, busy 0 (0 ms), retain 8>
    {
      \"BatteryInstalled\" = Yes
      \"CycleCount\" = 351
      \"DesignCapacity\" = 6075
      \"NominalChargeCapacity\" = 5225
      \"CurrentCapacity\" = 100
    }
";

pub const BRCTL_CAUGHT_UP: &str = "<com.apple.CloudDocs[1] foreground {client:idle server:caught-up \
last-sync:2026-03-14 09:12:44.118, ranking:0}>\n";

pub const BRCTL_SYNCING: &str =
    "<com.apple.CloudDocs[1] foreground {client:needs-sync server:full-sync}>\n";

pub const TMUTIL_IDLE: &str = "Backup session status:
{
    ClientID = \"com.apple.backupd\";
    Percent = \"1\";
    Running = 0;
}
";

pub const TMUTIL_RUNNING: &str = "Backup session status:
{
    BackupPhase = Copying;
    ClientID = \"com.apple.backupd\";
    Percent = \"0.45\";
    Running = 1;
}
";

pub const SCUTIL_NWI_REACHABLE: &str = "Network information

IPv4 network interface information
     en0 : flags      : 0x7 (IPv4,IPv6,DNS)
           address    : 192.168.4.159
           reach      : 0x00000002 (Reachable)

   REACH : flags 0x00000002 (Reachable)

IPv6 network interface information
   No IPv6 states found

   REACH : flags 0x00000000 (Not Reachable)

Network interfaces: en0
";

pub const SCUTIL_NWI_OFFLINE: &str = "Network information

IPv4 network interface information
   No IPv4 states found

   REACH : flags 0x00000000 (Not Reachable)
";

pub const BLUETOOTH_MODERN: &str = "Bluetooth:

      Bluetooth Controller:
          Address: D0:11:E5:3A:9D:DF
          State: On
          Chipset: BCM_4388C2
          Discoverable: Off
          Firmware Version: 23.3.214.1296

      Connected:
          AirPods Pro:
              Address: 74:15:F5:4E:D0:50
              Left Battery Level: 88%
              Right Battery Level: 91%
              Case Battery Level: 74%

      Not Connected:
          Keychron K2:
              Address: DD:21:78:46:F3:D2
              Minor Type: Keyboard
          MX Master 3:
              Address: EE:F8:FA:CA:8A:28
              Minor Type: Mouse
";

pub const BLUETOOTH_MODERN_LOW_DEVICE: &str = "Bluetooth:

      Bluetooth Controller:
          State: On

      Connected:
          Magic Mouse:
              Address: 88:E9:FE:11:22:33
              Battery Level: 6%
";

pub const BLUETOOTH_LEGACY: &str = "Bluetooth:

      Apple Bluetooth Software Version: 8.0.6d1
      Hardware, Features, and Settings:
          Address: F8:FF:C2:11:22:33
          Bluetooth Power: On
          Discoverable: Off

      Devices (Paired, Configured, etc.):
          AirPods Pro:
              Address: C4:CA:D9:AA:BB:CC
              Paired: Yes
              Connected: Yes
              Device batteryPercent: 79%
          MX Keys Mini:
              Address: D4:A3:3D:DD:EE:FF
              Paired: Yes
              Connected: Yes
          Magic Mouse:
              Address: 88:E9:FE:11:22:33
              Paired: Yes
              Connected: No
";

/// A laptop on AC power with nothing wrong.
pub fn healthy_machine() -> StubRunner {
    StubRunner::new()
        .with_output(commands::LOGICAL_CPU, LOGICAL_CPU)
        .with_output(commands::LOAD_AVG, LOAD_AVG_IDLE)
        .with_output(commands::MEMORY_LEVEL, MEMORY_LEVEL_HEALTHY)
        .with_output(commands::SWAP_USAGE, SWAP_USAGE)
        .with_output(commands::DISKUTIL_INFO, DISKUTIL_INFO)
        .with_output(commands::DF_ROOT, DF_ROOT)
        .with_output(commands::PMSET_THERM, PMSET_THERM_NOMINAL)
        .with_output(commands::PMSET_BATT, PMSET_BATT_AC)
        .with_output(commands::IOREG_BATTERY, IOREG_BATTERY)
        .with_output(commands::BRCTL_STATUS, BRCTL_CAUGHT_UP)
        .with_output(commands::TMUTIL_STATUS, TMUTIL_IDLE)
        .with_output(commands::SCUTIL_NWI, SCUTIL_NWI_REACHABLE)
        .with_output(commands::SYSTEM_PROFILER_BLUETOOTH, BLUETOOTH_MODERN)
}

/// A laptop in trouble: saturated CPU, memory exhausted, throttled, low
/// battery, offline, syncing, backing up, and a nearly flat mouse.
pub fn stressed_machine() -> StubRunner {
    StubRunner::new()
        .with_output(commands::LOGICAL_CPU, LOGICAL_CPU)
        .with_output(commands::LOAD_AVG, LOAD_AVG_SATURATED)
        .with_output(commands::MEMORY_LEVEL, MEMORY_LEVEL_CRITICAL)
        .with_output(commands::SWAP_USAGE, SWAP_USAGE)
        .with_exit_code(commands::DISKUTIL_INFO, 1)
        .with_output(commands::DF_ROOT, DF_ROOT_NEARLY_FULL)
        .with_output(commands::PMSET_THERM, PMSET_THERM_THROTTLED)
        .with_output(commands::PMSET_BATT, PMSET_BATT_LOW)
        .with_exit_code(commands::IOREG_BATTERY, 1)
        .with_output(commands::BRCTL_STATUS, BRCTL_SYNCING)
        .with_output(commands::TMUTIL_STATUS, TMUTIL_RUNNING)
        .with_output(commands::SCUTIL_NWI, SCUTIL_NWI_OFFLINE)
        .with_output(
            commands::SYSTEM_PROFILER_BLUETOOTH,
            BLUETOOTH_MODERN_LOW_DEVICE,
        )
}

/// Every command fails as if the binaries were missing.
pub fn bare_machine() -> StubRunner {
    StubRunner::new()
}
