//! Fixed table of the read-only system queries the probes issue.

use std::fmt;

/// An external command invoked with fixed arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandSpec {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

impl CommandSpec {
    pub const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }

    /// Bare utility name (e.g. `sysctl`), the key used for path overrides.
    pub fn utility(&self) -> &'static str {
        self.program
            .rsplit_once('/')
            .map_or(self.program, |(_, name)| name)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

pub const LOGICAL_CPU: CommandSpec = CommandSpec::new("/usr/sbin/sysctl", &["-n", "hw.logicalcpu"]);
pub const LOAD_AVG: CommandSpec = CommandSpec::new("/usr/sbin/sysctl", &["-n", "vm.loadavg"]);
pub const MEMORY_LEVEL: CommandSpec =
    CommandSpec::new("/usr/sbin/sysctl", &["-n", "kern.memorystatus_level"]);
pub const SWAP_USAGE: CommandSpec = CommandSpec::new("/usr/sbin/sysctl", &["vm.swapusage"]);
pub const DISKUTIL_INFO: CommandSpec = CommandSpec::new("/usr/sbin/diskutil", &["info", "/"]);
pub const DF_ROOT: CommandSpec = CommandSpec::new("/bin/df", &["-P", "/"]);
pub const PMSET_THERM: CommandSpec = CommandSpec::new("/usr/bin/pmset", &["-g", "therm"]);
pub const PMSET_BATT: CommandSpec = CommandSpec::new("/usr/bin/pmset", &["-g", "batt"]);
pub const IOREG_BATTERY: CommandSpec = CommandSpec::new(
    "/usr/sbin/ioreg",
    &["-r", "-c", "AppleSmartBattery", "-w0"],
);
pub const BRCTL_STATUS: CommandSpec =
    CommandSpec::new("/usr/bin/brctl", &["status", "com.apple.CloudDocs"]);
pub const TMUTIL_STATUS: CommandSpec = CommandSpec::new("/usr/bin/tmutil", &["status"]);
pub const SCUTIL_NWI: CommandSpec = CommandSpec::new("/usr/sbin/scutil", &["--nwi"]);
pub const SYSTEM_PROFILER_BLUETOOTH: CommandSpec =
    CommandSpec::new("/usr/sbin/system_profiler", &["SPBluetoothDataType"]);

/// Every command any probe may run.
pub const ALL: [CommandSpec; 13] = [
    LOGICAL_CPU,
    LOAD_AVG,
    MEMORY_LEVEL,
    SWAP_USAGE,
    DISKUTIL_INFO,
    DF_ROOT,
    PMSET_THERM,
    PMSET_BATT,
    IOREG_BATTERY,
    BRCTL_STATUS,
    TMUTIL_STATUS,
    SCUTIL_NWI,
    SYSTEM_PROFILER_BLUETOOTH,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utility_name() {
        assert_eq!(LOGICAL_CPU.utility(), "sysctl");
        assert_eq!(DF_ROOT.utility(), "df");
        assert_eq!(CommandSpec::new("pmset", &[]).utility(), "pmset");
    }

    #[test]
    fn test_display_joins_args() {
        assert_eq!(IOREG_BATTERY.to_string(), "/usr/sbin/ioreg -r -c AppleSmartBattery -w0");
    }

    #[test]
    fn test_all_commands_are_absolute_paths() {
        for spec in ALL {
            assert!(spec.program.starts_with('/'), "{}", spec);
        }
    }
}
