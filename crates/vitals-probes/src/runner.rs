use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::commands::CommandSpec;
use crate::{Error, Result};

/// Executes one external query and returns its standard output.
///
/// Implementations must treat spawn failure, unsuccessful exit, and
/// whitespace-only output as errors; probes rely on that to pick their
/// fallback.
pub trait CommandRunner: Send + Sync {
    fn run(&self, spec: &CommandSpec) -> Result<String>;
}

/// Runs commands on the host.
///
/// Program paths can be overridden per utility name, e.g. `sysctl` ->
/// `/opt/homebrew/bin/sysctl`.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    overrides: HashMap<String, PathBuf>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: HashMap<String, PathBuf>) -> Self {
        Self { overrides }
    }

    fn resolve(&self, spec: &CommandSpec) -> PathBuf {
        self.overrides
            .get(spec.utility())
            .cloned()
            .unwrap_or_else(|| PathBuf::from(spec.program))
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<String> {
        let program = self.resolve(spec);
        let program_name = program.display().to_string();

        let output = Command::new(&program)
            .args(spec.args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|source| Error::Spawn {
                program: program_name.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(Error::ExitStatus {
                program: program_name,
                code: output.status.code(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if stdout.trim().is_empty() {
            return Err(Error::EmptyOutput {
                program: program_name,
            });
        }

        Ok(stdout)
    }
}

/// Run a probe command, logging the outcome.
pub(crate) fn capture(runner: &dyn CommandRunner, spec: &CommandSpec) -> Result<String> {
    debug!(command = %spec, "running probe command");
    runner.run(spec).inspect_err(|err| {
        warn!(command = %spec, error = %err, "probe command unavailable");
    })
}

/// Append an advisory message to a record's error slot.
pub(crate) fn note_error(slot: &mut Option<String>, message: String) {
    match slot {
        Some(existing) => {
            existing.push_str("; ");
            existing.push_str(&message);
        }
        None => *slot = Some(message),
    }
}
