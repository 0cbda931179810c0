//! Scripted `CommandRunner` for probe and orchestrator tests.

use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use vitals_probes::{CommandRunner, CommandSpec, Error, Result};

#[derive(Debug, Clone)]
enum Response {
    Output(String),
    Exit(i32),
}

/// Answers each command from a script.
///
/// Commands that were never scripted behave like a missing binary, so
/// `StubRunner::new()` on its own simulates a machine with none of the
/// utilities installed.
///
/// # Example
/// ```
/// use vitals_probes::commands::TMUTIL_STATUS;
/// use vitals_testing::StubRunner;
///
/// let runner = StubRunner::new().with_output(TMUTIL_STATUS, "Running = 0;");
/// ```
#[derive(Debug, Default)]
pub struct StubRunner {
    responses: HashMap<CommandSpec, Response>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl StubRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful run printing `output`.
    pub fn with_output(mut self, spec: CommandSpec, output: impl Into<String>) -> Self {
        self.responses.insert(spec, Response::Output(output.into()));
        self
    }

    /// Script a run that exits with a non-zero status.
    pub fn with_exit_code(mut self, spec: CommandSpec, code: i32) -> Self {
        self.responses.insert(spec, Response::Exit(code));
        self
    }

    /// Commands issued so far, in call order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn was_called(&self, spec: &CommandSpec) -> bool {
        self.calls().contains(spec)
    }
}

impl CommandRunner for StubRunner {
    fn run(&self, spec: &CommandSpec) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(*spec);
        }

        match self.responses.get(spec) {
            Some(Response::Output(output)) if output.trim().is_empty() => Err(Error::EmptyOutput {
                program: spec.program.to_string(),
            }),
            Some(Response::Output(output)) => Ok(output.clone()),
            Some(Response::Exit(code)) => Err(Error::ExitStatus {
                program: spec.program.to_string(),
                code: Some(*code),
            }),
            None => Err(Error::Spawn {
                program: spec.program.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            }),
        }
    }
}
