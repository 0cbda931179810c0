use crate::types::LogLevel;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Overrides `--log-level` with a full filter, e.g. `vitals_probes=debug`.
pub const LOG_ENV_VAR: &str = "VITALS_LOG";

/// Install the stderr subscriber. Later calls are no-ops.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
