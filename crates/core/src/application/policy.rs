// Notification policies
//
// A policy decides, once per cycle, whether the current classification is
// worth an outbound alert. Recovery to Normal never is.
use super::classifier::Classification;
use std::time::Duration;
use tracing::debug;

/// Strategy deciding when a classification becomes an alert
pub trait NotificationPolicy: Send + Sync {
    fn should_alert(&mut self, classification: &Classification, now_millis: i64) -> bool;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Alert exactly once per transition into Warning or Critical
#[derive(Debug, Default, Clone, Copy)]
pub struct HysteresisPolicy;

impl NotificationPolicy for HysteresisPolicy {
    fn should_alert(&mut self, classification: &Classification, _now_millis: i64) -> bool {
        classification.changed() && classification.level.is_elevated()
    }

    fn name(&self) -> &'static str {
        "hysteresis"
    }
}

/// Alert on every transition into an elevated level, then repeat while the
/// level stays elevated, at most once per `min_interval`
#[derive(Debug, Clone)]
pub struct CooldownPolicy {
    min_interval_ms: i64,
    last_alert_at: Option<i64>,
}

impl CooldownPolicy {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval_ms: i64::try_from(min_interval.as_millis()).unwrap_or(i64::MAX),
            last_alert_at: None,
        }
    }
}

impl NotificationPolicy for CooldownPolicy {
    fn should_alert(&mut self, classification: &Classification, now_millis: i64) -> bool {
        if !classification.level.is_elevated() {
            self.last_alert_at = None;
            return false;
        }

        let due = classification.changed()
            || self
                .last_alert_at
                .map_or(true, |last| now_millis.saturating_sub(last) >= self.min_interval_ms);

        if due {
            self.last_alert_at = Some(now_millis);
        } else {
            debug!(
                level = %classification.level,
                "Alert suppressed by cooldown"
            );
        }
        due
    }

    fn name(&self) -> &'static str {
        "cooldown"
    }
}
