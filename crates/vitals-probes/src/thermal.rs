use std::sync::LazyLock;

use regex::Regex;
use vitals_types::ThermalRecord;

use crate::classify;
use crate::commands::PMSET_THERM;
use crate::runner::{CommandRunner, capture};
use crate::traits::Probe;

const UNTHROTTLED: u32 = 100;

static SPEED_LIMIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"CPU_Speed_Limit\s*=\s*(\d+)").unwrap());

const NO_WARNING_MARKERS: [&str; 2] = [
    "No thermal warning level has been recorded",
    "No CPU power status has been recorded",
];

/// CPU speed limit imposed by thermal management.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThermalProbe;

impl Probe for ThermalProbe {
    type Record = ThermalRecord;

    fn collect(&self, runner: &dyn CommandRunner) -> ThermalRecord {
        let out = match capture(runner, &PMSET_THERM) {
            Ok(out) => out,
            Err(err) => {
                return self.unavailable(format!("failed to read thermal state: {}", err));
            }
        };

        let cpu_speed_limit = parse_speed_limit(&out);
        ThermalRecord {
            status: classify::thermal(cpu_speed_limit),
            error: None,
            cpu_speed_limit,
            throttled: cpu_speed_limit < UNTHROTTLED,
        }
    }

    fn unavailable(&self, error: String) -> ThermalRecord {
        ThermalRecord {
            error: Some(error),
            ..ThermalRecord::default()
        }
    }
}

/// Percentage of maximum CPU speed allowed; 100 unless a positive limit is
/// reported.
pub fn parse_speed_limit(raw: &str) -> u32 {
    if NO_WARNING_MARKERS.iter().any(|marker| raw.contains(marker)) {
        return UNTHROTTLED;
    }

    SPEED_LIMIT_REGEX
        .captures(raw)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(UNTHROTTLED)
}
