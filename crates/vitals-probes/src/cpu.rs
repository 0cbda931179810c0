use vitals_types::CpuRecord;

use crate::classify;
use crate::commands::{LOAD_AVG, LOGICAL_CPU};
use crate::runner::{CommandRunner, capture, note_error};
use crate::traits::Probe;

/// Processor load relative to the number of logical cores.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuProbe;

impl Probe for CpuProbe {
    type Record = CpuRecord;

    fn collect(&self, runner: &dyn CommandRunner) -> CpuRecord {
        let mut record = CpuRecord::default();

        match capture(runner, &LOGICAL_CPU) {
            Ok(out) => record.logical_cores = parse_core_count(&out),
            Err(err) => note_error(&mut record.error, format!("failed to get cpu count: {}", err)),
        }

        match capture(runner, &LOAD_AVG) {
            Ok(out) => {
                let (l1, l5, l15) = parse_load_avg(&out);
                record.load_avg_1m = l1;
                record.load_avg_5m = l5;
                record.load_avg_15m = l15;
            }
            Err(err) => note_error(
                &mut record.error,
                format!("failed to get load averages: {}", err),
            ),
        }

        record.load_per_core = record.load_avg_1m / f64::from(record.logical_cores);
        record.status = classify::cpu(record.load_per_core);
        record
    }

    fn unavailable(&self, error: String) -> CpuRecord {
        CpuRecord {
            error: Some(error),
            ..CpuRecord::default()
        }
    }
}

/// Parse `{ 5.47 6.54 6.97 }` into the 1, 5 and 15 minute averages.
///
/// Anything short of three numeric fields yields all zeros.
pub fn parse_load_avg(raw: &str) -> (f64, f64, f64) {
    let inner = raw.trim().trim_matches(|c| c == '{' || c == '}' || c == ' ');
    let fields: Vec<f64> = inner
        .split_whitespace()
        .take(3)
        .map(|field| field.parse::<f64>())
        .collect::<Result<_, _>>()
        .unwrap_or_default();

    match fields.as_slice() {
        [l1, l5, l15] => (*l1, *l5, *l15),
        _ => (0.0, 0.0, 0.0),
    }
}

/// Logical core count; unparsable or zero falls back to 1.
pub fn parse_core_count(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(0) | Err(_) => 1,
        Ok(n) => n,
    }
}
