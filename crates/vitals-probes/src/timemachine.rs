use std::sync::LazyLock;

use regex::Regex;
use vitals_types::TimeMachineRecord;

use crate::classify;
use crate::commands::TMUTIL_STATUS;
use crate::runner::{CommandRunner, capture};
use crate::traits::Probe;

static RUNNING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Running\s*=\s*(\d)").unwrap());
/// `BackupPhase = Copying;` or `BackupPhase = "Copying";`
static PHASE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"BackupPhase\s*=\s*"?([^";\s]+)"?\s*;"#).unwrap());
static PERCENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"Percent\s*=\s*"([\d.e-]+)""#).unwrap());

/// Whether a scheduled backup session is in progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeMachineProbe;

impl Probe for TimeMachineProbe {
    type Record = TimeMachineRecord;

    fn collect(&self, runner: &dyn CommandRunner) -> TimeMachineRecord {
        let out = match capture(runner, &TMUTIL_STATUS) {
            Ok(out) => out,
            Err(err) => {
                return self.unavailable(format!("failed to read backup status: {}", err));
            }
        };

        let mut record = parse_tmutil(&out);
        record.status = classify::timemachine(record.running);
        record
    }

    fn unavailable(&self, error: String) -> TimeMachineRecord {
        TimeMachineRecord {
            error: Some(error),
            ..TimeMachineRecord::default()
        }
    }
}

/// Unclassified record from `tmutil status`.
///
/// `Percent` is a 0-1 fraction; negative values mean "not yet known".
pub fn parse_tmutil(raw: &str) -> TimeMachineRecord {
    let running = RUNNING_REGEX
        .captures(raw)
        .is_some_and(|caps| &caps[1] == "1");

    let phase = running
        .then(|| PHASE_REGEX.captures(raw).map(|caps| caps[1].to_string()))
        .flatten();

    let percent = PERCENT_REGEX
        .captures(raw)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .filter(|fraction| *fraction >= 0.0)
        .map(|fraction| fraction * 100.0);

    TimeMachineRecord {
        running,
        phase,
        percent,
        ..TimeMachineRecord::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_backup() {
        let raw = r#"Backup session status:
{
    BackupPhase = Copying;
    ClientID = "com.apple.backupd";
    Percent = "0.45";
    Running = 1;
}"#;
        let record = parse_tmutil(raw);
        assert!(record.running);
        assert_eq!(record.percent, Some(45.0));
        assert_eq!(record.phase.as_deref(), Some("Copying"));
    }

    #[test]
    fn test_running_with_quoted_phase() {
        let raw = "{\n    BackupPhase = \"ThinningPreBackup\";\n    Percent = \"-1\";\n    Running = 1;\n}";
        let record = parse_tmutil(raw);
        assert!(record.running);
        assert_eq!(record.phase.as_deref(), Some("ThinningPreBackup"));
        assert_eq!(record.percent, None);
    }

    #[test]
    fn test_idle_clears_phase() {
        let raw = "{\n    BackupPhase = \"Finishing\";\n    ClientID = \"com.apple.backupd\";\n    Percent = \"1\";\n    Running = 0;\n}";
        let record = parse_tmutil(raw);
        assert!(!record.running);
        assert_eq!(record.phase, None);
        assert_eq!(record.percent, Some(100.0));
    }

    #[test]
    fn test_empty_output() {
        assert_eq!(parse_tmutil(""), TimeMachineRecord::default());
    }
}
