//! Daemon settings
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `POOLWATCH__*` environment variables
//! (`POOLWATCH__WARNING_THRESHOLD=0.6`, `POOLWATCH__SOURCE__KIND=http`).

use config::{Config, ConfigError, Environment, File};
use poolwatch_core::application::MonitorConfig;
use poolwatch_core::domain::Thresholds;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "~/.poolwatch/config.toml";
pub const DEFAULT_STATS_PATH: &str = "~/.poolwatch/stats.json";
const ENV_PREFIX: &str = "POOLWATCH";

const fn default_timeout_secs() -> u64 {
    5
}

/// Where snapshots are read from
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceSettings {
    /// JSON stats document on disk
    File { path: String },
    /// JSON stats endpoint
    Http {
        url: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    /// Command printing a JSON stats document
    Command {
        command: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
        /// Extra environment variables passed to the command
        #[serde(default)]
        env: Vec<String>,
    },
}

/// Destination of status lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    #[default]
    Tracing,
    Stdout,
}

/// Outbound alert channel
#[derive(Debug, Clone, Deserialize)]
pub struct AlertSettings {
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Seconds between samples
    pub interval_secs: u64,
    pub warning_threshold: f64,
    pub critical_threshold: f64,
    /// Re-alert period while load stays elevated (unset: alert once per transition)
    #[serde(default)]
    pub alert_repeat_secs: Option<u64>,
    /// Master switch for outbound alerts; status lines are logged regardless
    pub alerts_enabled: bool,
    /// Prefix of every status line
    pub label: String,
    #[serde(default)]
    pub output: OutputKind,
    pub source: SourceSettings,
    #[serde(default)]
    pub alert: AlertSettings,
}

impl Settings {
    /// Load settings from defaults, `path` (if it exists) and the environment
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("interval_secs", 10)?
            .set_default("warning_threshold", Thresholds::DEFAULT_WARNING)?
            .set_default("critical_threshold", Thresholds::DEFAULT_CRITICAL)?
            .set_default("alerts_enabled", true)?
            .set_default("label", format!("poolwatch {}", poolwatch_core::VERSION))?
            .set_default("source.kind", "file")?
            .set_default("source.path", DEFAULT_STATS_PATH)?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Validated monitor configuration
    pub fn monitor_config(&self) -> poolwatch_core::Result<MonitorConfig> {
        let config = MonitorConfig {
            interval: Duration::from_secs(self.interval_secs),
            thresholds: Thresholds::new(self.warning_threshold, self.critical_threshold)?,
            alert_repeat: self.alert_repeat_secs.map(Duration::from_secs),
            label: self.label.clone(),
        };
        config.validate()?;
        Ok(config)
    }
}
