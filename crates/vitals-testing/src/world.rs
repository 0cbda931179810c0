//! TestWorld pattern for CLI integration tests.
//!
//! Provides a fluent interface for:
//! - Creating an isolated config directory
//! - Pointing utilities at replacement binaries through the config file
//! - Executing the `vitals` binary with that context

use anyhow::Result;
use assert_cmd::Command;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use vitals_probes::commands;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use vitals_testing::TestWorld;
///
/// let world = TestWorld::new().with_missing_utilities();
/// let result = world.run(&["check"]).unwrap();
/// assert_eq!(result.code(), Some(2));
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    config_path: PathBuf,
    overrides: BTreeMap<String, PathBuf>,
    interval_secs: Option<u64>,
    env_vars: Vec<(String, String)>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");

        Self {
            temp_dir,
            config_path,
            overrides: BTreeMap::new(),
            interval_secs: None,
            env_vars: Vec::new(),
        }
    }

    /// Get the temp directory root.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Replace one utility (by bare name, e.g. `sysctl`) with another path.
    pub fn with_utility(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.overrides.insert(name.to_string(), path.into());
        self
    }

    /// Point every probed utility at a path that does not exist.
    pub fn with_missing_utilities(mut self) -> Self {
        let missing = self.temp_dir.path().join("missing");
        for spec in commands::ALL {
            self.overrides
                .insert(spec.utility().to_string(), missing.join(spec.utility()));
        }
        self
    }

    pub fn with_watch_interval(mut self, secs: u64) -> Self {
        self.interval_secs = Some(secs);
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    /// Render the config file contents for the current settings.
    pub fn config_toml(&self) -> String {
        let mut out = String::new();
        if let Some(secs) = self.interval_secs {
            out.push_str(&format!("[watch]\ninterval_secs = {}\n\n", secs));
        }
        out.push_str("[commands]\n");
        for (name, path) in &self.overrides {
            out.push_str(&format!("{} = {:?}\n", name, path.display().to_string()));
        }
        out
    }

    /// Write the config file and configure a CLI command to use it.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> Result<&'a mut Command> {
        std::fs::write(&self.config_path, self.config_toml())?;

        cmd.arg("--config").arg(&self.config_path);
        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("VITALS_CONFIG");
        cmd.env_remove("VITALS_LOG");
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        Ok(cmd)
    }

    /// Execute the `vitals` binary with this environment and return the result.
    ///
    /// # Note
    /// This uses `Command::cargo_bin()`, which needs the binary built by
    /// `cargo test`.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("vitals")
            .map_err(|e| anyhow::anyhow!("Failed to find vitals binary: {}", e))?;

        self.configure_command(&mut cmd)?;
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Parse stdout as a single JSON document.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    /// Parse stdout as one JSON document per line.
    pub fn json_lines(&self) -> Result<Vec<serde_json::Value>> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(anyhow::Error::from))
            .collect()
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
