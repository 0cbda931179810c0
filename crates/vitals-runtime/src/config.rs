use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use vitals_probes::SystemRunner;

pub const CONFIG_ENV_VAR: &str = "VITALS_CONFIG";

const DEFAULT_WATCH_INTERVAL_SECS: u64 = 5;

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. VITALS_CONFIG environment variable (with tilde expansion)
/// 3. `<config dir>/vitals/config.toml`
///
/// `None` when no candidate exists at all, which means "use defaults".
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    let env_path = std::env::var(CONFIG_ENV_VAR).ok();
    resolve_from(explicit_path, env_path.as_deref())
}

fn resolve_from(explicit_path: Option<&Path>, env_path: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(expand_tilde(&path.to_string_lossy()));
    }

    if let Some(env_path) = env_path.filter(|p| !p.is_empty()) {
        return Some(expand_tilde(env_path));
    }

    dirs::config_dir().map(|dir| dir.join("vitals").join("config.toml"))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_interval_secs() -> u64 {
    DEFAULT_WATCH_INTERVAL_SECS
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_WATCH_INTERVAL_SECS,
        }
    }
}

/// Settings file. Thresholds and weights are fixed and not read from here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,

    /// Utility name (e.g. `sysctl`) to the program path to run instead.
    #[serde(default)]
    pub commands: HashMap<String, PathBuf>,
}

impl Config {
    /// Load from the resolved path; a missing file yields defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match resolve_config_path(explicit_path) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.watch.interval_secs == 0 {
            return Err(Error::Config(
                "watch.interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_secs(self.watch.interval_secs)
    }

    /// Host command runner honouring the `[commands]` overrides.
    pub fn runner(&self) -> SystemRunner {
        SystemRunner::with_overrides(self.commands.clone())
    }
}
