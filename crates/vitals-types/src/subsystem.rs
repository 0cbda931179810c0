use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Severity;

/// One monitored facet of the machine.
///
/// Declaration order is the probe order: diagnoses and score reasons are
/// emitted in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subsystem {
    Cpu,
    Memory,
    Disk,
    Thermal,
    ICloud,
    Battery,
    TimeMachine,
    Network,
    Bluetooth,
}

impl Subsystem {
    pub const ALL: [Subsystem; 9] = [
        Subsystem::Cpu,
        Subsystem::Memory,
        Subsystem::Disk,
        Subsystem::Thermal,
        Subsystem::ICloud,
        Subsystem::Battery,
        Subsystem::TimeMachine,
        Subsystem::Network,
        Subsystem::Bluetooth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Subsystem::Cpu => "cpu",
            Subsystem::Memory => "memory",
            Subsystem::Disk => "disk",
            Subsystem::Thermal => "thermal",
            Subsystem::ICloud => "icloud",
            Subsystem::Battery => "battery",
            Subsystem::TimeMachine => "timemachine",
            Subsystem::Network => "network",
            Subsystem::Bluetooth => "bluetooth",
        }
    }

    /// Highest severity this subsystem may contribute.
    ///
    /// Bluetooth is informational and never reports critical.
    pub fn severity_cap(self) -> Severity {
        match self {
            Subsystem::Bluetooth => Severity::Degraded,
            _ => Severity::Critical,
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_tag_matches_as_str() {
        for subsystem in Subsystem::ALL {
            let json = serde_json::to_string(&subsystem).unwrap();
            assert_eq!(json, format!("\"{}\"", subsystem.as_str()));
        }
    }

    #[test]
    fn test_only_bluetooth_is_capped() {
        for subsystem in Subsystem::ALL {
            let expected = if subsystem == Subsystem::Bluetooth {
                Severity::Degraded
            } else {
                Severity::Critical
            };
            assert_eq!(subsystem.severity_cap(), expected, "{}", subsystem);
        }
    }
}
