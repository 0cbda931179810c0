use std::sync::LazyLock;

use regex::Regex;
use vitals_types::{DiskRecord, DiskSource};

use crate::classify;
use crate::commands::{DF_ROOT, DISKUTIL_INFO};
use crate::runner::{CommandRunner, capture, note_error};
use crate::traits::Probe;

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const DF_BLOCK_SIZE: f64 = 512.0;

// diskutil prints either "994.7 GB (994662584320 Bytes)" or
// "994662584320 Bytes (994.7 GB)" depending on the release.
static CONTAINER_TOTAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"Container Total Space:\s+(?:[\d.]+ \w+ \((\d+) Bytes\)|(\d+) Bytes \([\d.]+ \w+\))",
    )
    .unwrap()
});
static CONTAINER_FREE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"Container Free Space:\s+(?:[\d.]+ \w+ \((\d+) Bytes\)|(\d+) Bytes \([\d.]+ \w+\))",
    )
    .unwrap()
});

/// Free space on the boot volume's APFS container.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskProbe;

impl Probe for DiskProbe {
    type Record = DiskRecord;

    fn collect(&self, runner: &dyn CommandRunner) -> DiskRecord {
        let mut record = DiskRecord::default();

        if let Ok(out) = capture(runner, &DISKUTIL_INFO) {
            let (total, available) = parse_diskutil(&out);
            if total > 0.0 {
                record.total_gb = total;
                record.available_gb = available;
                record.source = Some(DiskSource::Diskutil);
            }
        }

        if record.source.is_none() {
            match capture(runner, &DF_ROOT) {
                Ok(out) => {
                    let (total, available) = parse_df(&out);
                    if total > 0.0 {
                        record.total_gb = total;
                        record.available_gb = available;
                        record.source = Some(DiskSource::Df);
                    } else {
                        note_error(&mut record.error, "disk capacity not reported".to_string());
                    }
                }
                Err(err) => {
                    note_error(&mut record.error, format!("failed to get disk info: {}", err))
                }
            }
        }

        if let Some(available) = record.available_percent() {
            record.used_percent = 100.0 - available;
        }
        record.status = classify::disk(record.available_percent());
        record
    }

    fn unavailable(&self, error: String) -> DiskRecord {
        DiskRecord {
            status: classify::disk(None),
            error: Some(error),
            ..DiskRecord::default()
        }
    }
}

/// Container `(total_gb, available_gb)` from `diskutil info /`.
pub fn parse_diskutil(raw: &str) -> (f64, f64) {
    (
        byte_count(&CONTAINER_TOTAL_REGEX, raw).map_or(0.0, |b| b / BYTES_PER_GIB),
        byte_count(&CONTAINER_FREE_REGEX, raw).map_or(0.0, |b| b / BYTES_PER_GIB),
    )
}

fn byte_count(pattern: &Regex, raw: &str) -> Option<f64> {
    let caps = pattern.captures(raw)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .and_then(|m| m.as_str().parse().ok())
}

/// `(total_gb, available_gb)` from POSIX `df -P /` (512-byte blocks).
pub fn parse_df(raw: &str) -> (f64, f64) {
    let Some(line) = raw.trim().lines().nth(1) else {
        return (0.0, 0.0);
    };
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return (0.0, 0.0);
    }

    let blocks = |field: &str| field.parse::<f64>().unwrap_or(0.0) * DF_BLOCK_SIZE / BYTES_PER_GIB;
    (blocks(fields[1]), blocks(fields[3]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISKUTIL_SAMPLE: &str = "   Device Identifier:         disk3s1s1
   Volume Name:               Macintosh HD
   Container Total Space:     994.7 GB (994662584320 Bytes) (exactly 1942700360 512-Byte-Units)
   Container Free Space:      165.8 GB (165804609536 Bytes) (exactly 323837128 512-Byte-Units)
";

    const DISKUTIL_BYTES_FIRST: &str = "   Container Total Space:     994662584320 Bytes (994.7 GB)
   Container Free Space:      165804609536 Bytes (165.8 GB)
";

    const DF_SAMPLE: &str = "Filesystem     512-blocks      Used Available Capacity  Mounted on
/dev/disk3s1s1 1942700360  20482328 323837128     6%    /
";

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_parse_diskutil() {
        let (total, available) = parse_diskutil(DISKUTIL_SAMPLE);
        assert!(approx(total, 994662584320.0 / BYTES_PER_GIB));
        assert!(approx(available, 165804609536.0 / BYTES_PER_GIB));
    }

    #[test]
    fn test_parse_diskutil_bytes_first_layout() {
        assert_eq!(
            parse_diskutil(DISKUTIL_BYTES_FIRST),
            parse_diskutil(DISKUTIL_SAMPLE)
        );
    }

    #[test]
    fn test_parse_diskutil_missing_lines() {
        assert_eq!(parse_diskutil("Volume Name: Data"), (0.0, 0.0));
    }

    #[test]
    fn test_parse_df() {
        let (total, available) = parse_df(DF_SAMPLE);
        assert!(approx(total, 1942700360.0 * 512.0 / BYTES_PER_GIB));
        assert!(approx(available, 323837128.0 * 512.0 / BYTES_PER_GIB));
    }

    #[test]
    fn test_parse_df_header_only() {
        assert_eq!(parse_df("Filesystem 512-blocks Used Available\n"), (0.0, 0.0));
        assert_eq!(parse_df(""), (0.0, 0.0));
    }
}
