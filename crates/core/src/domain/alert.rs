// Alert Domain Model

use super::load::LoadLevel;
use serde::{Deserialize, Serialize};

/// Severity tag attached to an outbound alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Warning,
    Error,
}

/// Level-change event delivered to an alert sink
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub level: LoadLevel,
    pub severity: AlertSeverity,
    pub message: String,
    /// Utilization ratio (0.0 - 1.0) at the time of the alert
    pub utilization: f64,
    /// Milliseconds since epoch
    pub raised_at: i64,
}
