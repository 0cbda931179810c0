use vitals_types::{Subsystem, SubsystemRecord};

use crate::runner::CommandRunner;

/// One subsystem probe: query, parse, classify.
///
/// Responsibilities:
/// - Run the subsystem's fixed commands through a `CommandRunner`
/// - Parse whatever text came back into the canonical record
/// - Classify the record so it always leaves with a defined severity
pub trait Probe: Send + Sync + 'static {
    type Record: SubsystemRecord + Send + 'static;

    fn subsystem(&self) -> Subsystem {
        <Self::Record as SubsystemRecord>::SUBSYSTEM
    }

    /// Produce a classified record. Never fails; unavailable commands
    /// degrade the record to the subsystem's default.
    fn collect(&self, runner: &dyn CommandRunner) -> Self::Record;

    /// Default-safe record carrying an advisory error, used when the probe
    /// itself could not run to completion.
    fn unavailable(&self, error: String) -> Self::Record;
}
