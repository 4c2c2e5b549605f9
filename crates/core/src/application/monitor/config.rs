// Monitor configuration

use super::constants::{DEFAULT_INTERVAL, DEFAULT_LABEL};
use crate::application::policy::{CooldownPolicy, HysteresisPolicy, NotificationPolicy};
use crate::domain::{DomainError, Thresholds};
use std::time::Duration;

/// Settings fixed at monitor construction
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Pause between sampling cycles
    pub interval: Duration,

    pub thresholds: Thresholds,

    /// Minimum time between repeated alerts at the same elevated level.
    /// `None` keeps pure hysteresis (one alert per transition).
    pub alert_repeat: Option<Duration>,

    /// Identifying prefix of status lines
    pub label: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            thresholds: Thresholds::default(),
            alert_repeat: None,
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.interval.is_zero() {
            return Err(DomainError::InvalidInterval);
        }
        if matches!(self.alert_repeat, Some(repeat) if repeat.is_zero()) {
            return Err(DomainError::ValidationError(
                "alert repeat interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Notification policy selected by `alert_repeat`
    pub fn notification_policy(&self) -> Box<dyn NotificationPolicy> {
        match self.alert_repeat {
            Some(repeat) => Box::new(CooldownPolicy::new(repeat)),
            None => Box::new(HysteresisPolicy),
        }
    }
}
