use super::args::{Cli, Commands};
use super::handlers;
use crate::logging;
use crate::output::OutputMode;
use anyhow::Result;
use std::time::Duration;
use tracing::debug;
use vitals_runtime::{Config, HealthCheck};

/// Run the CLI and return the process exit code for the health outcome.
pub fn run(cli: Cli) -> Result<i32> {
    logging::init(cli.log_level);

    let config = Config::load(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    let check = HealthCheck::from_config(&config);
    let mode = OutputMode::for_stdout(cli.compact);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| vitals_runtime::Error::Runtime(e.to_string()))?;

    let command = cli.command.unwrap_or(Commands::Check);

    runtime.block_on(async move {
        match command {
            Commands::Check => handlers::check::handle(&check, mode).await,
            Commands::Diagnose => handlers::diagnose::handle(&check, mode).await,
            Commands::Watch { interval, count } => {
                let interval = interval
                    .map(Duration::from_secs)
                    .unwrap_or_else(|| config.watch_interval());
                handlers::watch::handle(check, interval, count).await
            }
        }
    })
}
