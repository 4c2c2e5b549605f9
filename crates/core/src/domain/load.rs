// Load Level Domain Model

use super::alert::AlertSeverity;
use super::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Discrete thread-pool utilization severity, ordered `Normal < Warning < Critical`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadLevel {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl LoadLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadLevel::Normal => "normal",
            LoadLevel::Warning => "warning",
            LoadLevel::Critical => "critical",
        }
    }

    /// Warning or Critical
    pub fn is_elevated(&self) -> bool {
        *self != LoadLevel::Normal
    }

    /// Alert severity for this level; `None` for Normal (recovery is never alarmed)
    pub fn severity(&self) -> Option<AlertSeverity> {
        match self {
            LoadLevel::Normal => None,
            LoadLevel::Warning => Some(AlertSeverity::Warning),
            LoadLevel::Critical => Some(AlertSeverity::Error),
        }
    }
}

impl std::fmt::Display for LoadLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadLevel::Normal => write!(f, "NORMAL"),
            LoadLevel::Warning => write!(f, "WARNING"),
            LoadLevel::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Utilization ratios at which the load level escalates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    warning: f64,
    critical: f64,
}

impl Thresholds {
    pub const DEFAULT_WARNING: f64 = 0.70;
    pub const DEFAULT_CRITICAL: f64 = 0.85;

    /// Build thresholds, enforcing `0 < warning < critical < 1`
    pub fn new(warning: f64, critical: f64) -> Result<Self> {
        let in_range = |v: f64| v > 0.0 && v < 1.0;
        if !in_range(warning) || !in_range(critical) || warning >= critical {
            return Err(DomainError::InvalidThresholds { warning, critical });
        }
        Ok(Self { warning, critical })
    }

    pub fn warning(&self) -> f64 {
        self.warning
    }

    pub fn critical(&self) -> f64 {
        self.critical
    }

    /// Threshold that must be reached to enter `level` (`None` for Normal)
    pub fn for_level(&self, level: LoadLevel) -> Option<f64> {
        match level {
            LoadLevel::Normal => None,
            LoadLevel::Warning => Some(self.warning),
            LoadLevel::Critical => Some(self.critical),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning: Self::DEFAULT_WARNING,
            critical: Self::DEFAULT_CRITICAL,
        }
    }
}
