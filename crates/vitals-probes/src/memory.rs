use std::sync::LazyLock;

use regex::Regex;
use vitals_types::MemoryRecord;

use crate::classify;
use crate::commands::{MEMORY_LEVEL, SWAP_USAGE};
use crate::runner::{CommandRunner, capture, note_error};
use crate::traits::Probe;

/// `vm.swapusage: total = 2048.00M  used = 1034.25M  free = 1013.75M`
static SWAP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"total\s*=\s*([\d.]+)M\s+used\s*=\s*([\d.]+)M").unwrap());

/// Kernel free-memory level plus swap usage.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryProbe;

impl Probe for MemoryProbe {
    type Record = MemoryRecord;

    fn collect(&self, runner: &dyn CommandRunner) -> MemoryRecord {
        let mut record = MemoryRecord::default();

        match capture(runner, &MEMORY_LEVEL) {
            Ok(out) => record.pressure_percent = parse_memory_level(&out),
            Err(err) => note_error(
                &mut record.error,
                format!("failed to get memory pressure: {}", err),
            ),
        }

        // Swap is supplementary; its absence is not worth an advisory.
        if let Ok(out) = capture(runner, &SWAP_USAGE) {
            let (total, used) = parse_swap(&out);
            record.swap_total_mb = total;
            record.swap_used_mb = used;
        }

        record.status = classify::memory(record.pressure_percent);
        record
    }

    fn unavailable(&self, error: String) -> MemoryRecord {
        MemoryRecord {
            status: classify::memory(None),
            error: Some(error),
            ..MemoryRecord::default()
        }
    }
}

pub fn parse_memory_level(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// Returns `(total_mb, used_mb)`; zeros when the line is not recognized.
pub fn parse_swap(raw: &str) -> (f64, f64) {
    SWAP_REGEX
        .captures(raw)
        .map(|caps| {
            let total = caps[1].parse().unwrap_or(0.0);
            let used = caps[2].parse().unwrap_or(0.0);
            (total, used)
        })
        .unwrap_or((0.0, 0.0))
}
