use crate::types::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vitals")]
#[command(about = "Check the health of a macOS workstation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to $VITALS_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Print single-line JSON even on a terminal
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe every subsystem once and print the scored report
    Check,

    /// Like `check`, with an explanation and suggested action per problem
    Diagnose,

    /// Re-run the check at a fixed interval, one JSON line per check
    Watch {
        /// Seconds between checks (overrides `[watch] interval_secs`)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,

        /// Stop after this many checks
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        count: Option<u64>,
    },
}
