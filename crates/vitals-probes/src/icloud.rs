use std::sync::LazyLock;

use regex::Regex;
use vitals_types::ICloudRecord;

use crate::classify;
use crate::commands::BRCTL_STATUS;
use crate::runner::{CommandRunner, capture};
use crate::traits::Probe;

static ANSI_ESCAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());
static LAST_SYNC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"last-sync:(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})").unwrap()
});

/// Sync state of the iCloud Drive documents container.
#[derive(Debug, Clone, Copy, Default)]
pub struct ICloudProbe;

impl Probe for ICloudProbe {
    type Record = ICloudRecord;

    fn collect(&self, runner: &dyn CommandRunner) -> ICloudRecord {
        let out = match capture(runner, &BRCTL_STATUS) {
            Ok(out) => out,
            Err(err) => {
                return self.unavailable(format!("failed to read iCloud status: {}", err));
            }
        };

        let mut record = parse_brctl(&out);
        record.status = classify::icloud(record.caught_up);
        record
    }

    fn unavailable(&self, error: String) -> ICloudRecord {
        ICloudRecord {
            error: Some(error),
            ..ICloudRecord::default()
        }
    }
}

/// Unclassified record from `brctl status` output (colour codes allowed).
pub fn parse_brctl(raw: &str) -> ICloudRecord {
    let text = ANSI_ESCAPE_REGEX.replace_all(raw, "");

    let caught_up = text.contains("caught-up");
    ICloudRecord {
        syncing: text.contains("client:needs-sync") || !caught_up,
        caught_up,
        last_sync: LAST_SYNC_REGEX
            .captures(&text)
            .map(|caps| caps[1].to_string()),
        ..ICloudRecord::default()
    }
}
