use serde::{Deserialize, Serialize};
use std::fmt;

/// Tri-state subsystem health.
///
/// Variants are declared in ascending order of badness so the derived `Ord`
/// gives `Nominal < Degraded < Critical`, which is what worst-of folding uses.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Nominal,
    Degraded,
    Critical,
}

impl Severity {
    /// Worst severity of a sequence; `Nominal` when empty.
    pub fn worst<I>(severities: I) -> Severity
    where
        I: IntoIterator<Item = Severity>,
    {
        severities
            .into_iter()
            .max()
            .unwrap_or(Severity::Nominal)
    }

    /// Clamp to at most `cap`.
    pub fn capped_at(self, cap: Severity) -> Severity {
        self.min(cap)
    }

    /// Per-subsystem score used by the composite average.
    pub fn score(self) -> u32 {
        match self {
            Severity::Nominal => 100,
            Severity::Degraded => 50,
            Severity::Critical => 0,
        }
    }

    /// Process exit code for a report with this overall severity.
    pub fn exit_code(self) -> i32 {
        match self {
            Severity::Nominal => 0,
            Severity::Degraded => 1,
            Severity::Critical => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Nominal => "nominal",
            Severity::Degraded => "degraded",
            Severity::Critical => "critical",
        }
    }

    pub fn is_nominal(self) -> bool {
        self == Severity::Nominal
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
