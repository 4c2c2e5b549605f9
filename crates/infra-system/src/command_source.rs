// Command stats source
// reason: tokio::process for async subprocess management (e.g. `pumactl stats`)
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::stats_document::parse_stats_document;
use poolwatch_core::domain::StatsSnapshot;
use poolwatch_core::port::{StatsSource, StatsSourceError};

/// Environment variables passed to the stats command by default
pub const DEFAULT_ENV_ALLOWLIST: &[&str] = &["PATH", "HOME", "USER"];

/// Runs a command that prints a stats document on stdout
pub struct CommandStatsSource {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    env_allowlist: Vec<String>,
}

impl CommandStatsSource {
    /// Create a command source
    ///
    /// # Example
    /// ```ignore
    /// let source = CommandStatsSource::new(
    ///     "pumactl",
    ///     vec!["stats".to_string()],
    ///     Duration::from_secs(5),
    /// );
    /// ```
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
            env_allowlist: DEFAULT_ENV_ALLOWLIST.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the environment allowlist (the child starts with an empty environment)
    pub fn with_env_allowlist(mut self, allowlist: Vec<String>) -> Self {
        self.env_allowlist = allowlist;
        self
    }

    /// Allowlisted variables from the current environment
    fn filtered_env(&self) -> Vec<(String, String)> {
        std::env::vars()
            .filter(|(k, _)| self.env_allowlist.contains(k))
            .collect()
    }
}

#[async_trait]
impl StatsSource for CommandStatsSource {
    async fn snapshot(&self) -> Result<StatsSnapshot, StatsSourceError> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .env_clear()
            .envs(self.filtered_env())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| StatsSourceError::Unavailable(format!("{}: {}", self.program, e)))?;

        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(StatsSourceError::Io(e)),
            Err(_) => {
                warn!(command = %self.program, "Stats command timed out");
                return Err(StatsSourceError::Timeout(self.timeout.as_millis() as u64));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StatsSourceError::Unavailable(format!(
                "{} exited with {:?}: {}",
                self.program,
                output.status.code(),
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(command = %self.program, bytes = stdout.len(), "Stats command completed");
        parse_stats_document(&stdout)
    }
}
