// Error types
pub mod error;

// Settings
pub mod config;

// Orchestration
pub mod check;
pub mod watcher;

pub use check::HealthCheck;
pub use config::{CONFIG_ENV_VAR, Config, WatchConfig, resolve_config_path};
pub use error::{Error, Result};
pub use watcher::{StopSignal, Watcher};
