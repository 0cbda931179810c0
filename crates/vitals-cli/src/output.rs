//! JSON rendering of reports on stdout.

use is_terminal::IsTerminal;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Pretty,
    Compact,
}

impl OutputMode {
    /// Pretty on a terminal, compact when piped or when forced.
    pub fn for_stdout(force_compact: bool) -> Self {
        if force_compact || !io::stdout().is_terminal() {
            OutputMode::Compact
        } else {
            OutputMode::Pretty
        }
    }
}

pub fn write_json<W: Write, T: Serialize>(
    out: &mut W,
    value: &T,
    mode: OutputMode,
) -> io::Result<()> {
    match mode {
        OutputMode::Pretty => serde_json::to_writer_pretty(&mut *out, value)?,
        OutputMode::Compact => serde_json::to_writer(&mut *out, value)?,
    }
    writeln!(out)?;
    out.flush()
}

pub fn print_json<T: Serialize>(value: &T, mode: OutputMode) -> io::Result<()> {
    write_json(&mut io::stdout().lock(), value, mode)
}
