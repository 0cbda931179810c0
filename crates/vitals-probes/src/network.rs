use std::sync::LazyLock;

use regex::Regex;
use vitals_types::NetworkRecord;

use crate::classify;
use crate::commands::SCUTIL_NWI;
use crate::runner::{CommandRunner, capture};
use crate::traits::Probe;

static REACH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"REACH\s*:\s*flags\s*\S+\s*\(([^)]*)\)").unwrap());
static INTERFACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s*:\s*flags\s*:\s*\S+\s*\(.*IPv4").unwrap());
static ADDRESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"address\s*:\s*([\d.]+)").unwrap());

/// Global reachability and the primary IPv4 interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkProbe;

impl Probe for NetworkProbe {
    type Record = NetworkRecord;

    fn collect(&self, runner: &dyn CommandRunner) -> NetworkRecord {
        let out = match capture(runner, &SCUTIL_NWI) {
            Ok(out) => out,
            Err(err) => return self.unavailable(format!("failed to check network: {}", err)),
        };

        let mut record = parse_nwi(&out);
        record.status = classify::network(record.reachable);
        record
    }

    fn unavailable(&self, error: String) -> NetworkRecord {
        NetworkRecord {
            status: classify::network(false),
            error: Some(error),
            ..NetworkRecord::default()
        }
    }
}

/// Unclassified record from `scutil --nwi`.
///
/// Reachability comes from the global `REACH` line; its flag list must
/// contain a bare `Reachable` entry, so `Not Reachable` does not count.
pub fn parse_nwi(raw: &str) -> NetworkRecord {
    let reachable = REACH_REGEX.captures(raw).is_some_and(|caps| {
        caps[1]
            .split(',')
            .any(|flag| flag.trim() == "Reachable")
    });

    NetworkRecord {
        reachable,
        interface: INTERFACE_REGEX
            .captures(raw)
            .map(|caps| caps[1].to_string()),
        ip: ADDRESS_REGEX.captures(raw).map(|caps| caps[1].to_string()),
        ..NetworkRecord::default()
    }
}
