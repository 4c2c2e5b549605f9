// Notification dispatcher - best-effort delivery of level alerts
use super::classifier::Classification;
use super::policy::{HysteresisPolicy, NotificationPolicy};
use crate::domain::{Alert, LoadLevel};
use crate::port::{AlertSink, TimeProvider};
use std::sync::Arc;
use tracing::{info, warn};

/// What happened to a notification request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Delivered to the sink
    Sent,
    /// Level has no severity (recovery), nothing to alarm
    Skipped,
    /// No sink configured
    NoSink,
    /// Sink rejected the alert; already logged
    Failed(String),
}

/// Routes alerts to the configured sink under a notification policy
pub struct NotificationDispatcher {
    sink: Option<Arc<dyn AlertSink>>,
    policy: Box<dyn NotificationPolicy>,
    time_provider: Arc<dyn TimeProvider>,
}

impl NotificationDispatcher {
    /// Create a dispatcher
    ///
    /// # Arguments
    /// * `sink` - Alert channel, `None` silently skips delivery
    /// * `policy` - When to alert (hysteresis or cooldown)
    /// * `time_provider` - Clock for alert timestamps and cooldowns
    pub fn new(
        sink: Option<Arc<dyn AlertSink>>,
        policy: Box<dyn NotificationPolicy>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            sink,
            policy,
            time_provider,
        }
    }

    /// Hysteresis-only dispatcher
    pub fn with_sink(sink: Arc<dyn AlertSink>, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self::new(Some(sink), Box::new(HysteresisPolicy), time_provider)
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Ask the policy whether this classification should raise an alert
    pub fn wants_alert(&mut self, classification: &Classification) -> bool {
        let now = self.time_provider.now_millis();
        self.policy.should_alert(classification, now)
    }

    /// Send `message` for `level` to the sink
    ///
    /// Never fails: sink errors are logged and reported as `Failed`.
    pub async fn notify(&self, level: LoadLevel, message: &str, utilization: f64) -> DispatchOutcome {
        let Some(severity) = level.severity() else {
            return DispatchOutcome::Skipped;
        };
        let Some(sink) = &self.sink else {
            return DispatchOutcome::NoSink;
        };

        let alert = Alert {
            level,
            severity,
            message: message.to_string(),
            utilization,
            raised_at: self.time_provider.now_millis(),
        };

        match sink.notify(&alert).await {
            Ok(()) => {
                info!(level = %level, severity = ?severity, "Alert delivered");
                DispatchOutcome::Sent
            }
            Err(e) => {
                warn!(level = %level, error = %e, "Alert sink failed, continuing");
                DispatchOutcome::Failed(e.to_string())
            }
        }
    }
}
