// Monitor - sampling/classification loop

pub mod config;
pub mod constants;
mod shutdown;

pub use config::MonitorConfig;
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};

use crate::application::aggregator::aggregate;
use crate::application::classifier::{Classification, LoadClassifier};
use crate::application::dispatcher::{DispatchOutcome, NotificationDispatcher};
use crate::domain::{LifecycleEvent, LoadLevel, MonitorState};
use crate::error::{AppError, Result};
use crate::port::{AlertSink, LogWriter, StatsSource, TimeProvider};
use chrono::{TimeZone, Utc};
use constants::LOG_TIMESTAMP_FORMAT;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{info, warn};

/// Counters accumulated over a monitor's lifetime
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorReport {
    /// Cycles that obtained a snapshot
    pub cycles: u64,
    /// Cycles skipped because the source failed
    pub skipped: u64,
    pub alerts_sent: u64,
    pub final_level: LoadLevel,
}

/// Periodic monitor over one stats source
///
/// Owns all mutable monitoring state (current level, last status line), so
/// several monitors can run side by side.
pub struct MonitorLoop {
    config: MonitorConfig,
    source: Arc<dyn StatsSource>,
    log_writer: Arc<dyn LogWriter>,
    classifier: LoadClassifier,
    dispatcher: NotificationDispatcher,
    time_provider: Arc<dyn TimeProvider>,
    last_status: Option<String>,
    report: MonitorReport,
}

impl MonitorLoop {
    /// Create a monitor
    ///
    /// # Arguments
    /// * `config` - Interval, thresholds, alert repeat and log label
    /// * `source` - Where snapshots come from
    /// * `log_writer` - Destination of status lines
    /// * `sink` - Alert channel (`None` disables outbound alerts)
    /// * `time_provider` - Clock for log timestamps and alert cooldowns
    ///
    /// # Errors
    /// `AppError::Domain` when the configuration is invalid
    pub fn new(
        config: MonitorConfig,
        source: Arc<dyn StatsSource>,
        log_writer: Arc<dyn LogWriter>,
        sink: Option<Arc<dyn AlertSink>>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Result<Self> {
        config.validate()?;

        let dispatcher = NotificationDispatcher::new(
            sink,
            config.notification_policy(),
            Arc::clone(&time_provider),
        );

        Ok(Self {
            classifier: LoadClassifier::new(config.thresholds),
            config,
            source,
            log_writer,
            dispatcher,
            time_provider,
            last_status: None,
            report: MonitorReport::default(),
        })
    }

    pub fn current_level(&self) -> LoadLevel {
        self.classifier.current()
    }

    pub fn report(&self) -> &MonitorReport {
        &self.report
    }

    /// Spawn the loop on the current tokio runtime
    pub fn start(self) -> MonitorHandle {
        let (shutdown_tx, shutdown_rx) = shutdown_channel();
        let running = Arc::new(AtomicBool::new(true));
        let task = tokio::spawn(self.run(shutdown_rx, Arc::clone(&running)));

        MonitorHandle {
            shutdown: shutdown_tx,
            running,
            task,
        }
    }

    /// Run until shutdown: sleep, sample, repeat
    ///
    /// Shutdown is honoured at wake-up boundaries only; a cycle that already
    /// started runs to completion.
    pub async fn run(
        mut self,
        mut shutdown: ShutdownToken,
        running: Arc<AtomicBool>,
    ) -> MonitorReport {
        info!(
            interval_ms = self.config.interval.as_millis() as u64,
            warning = self.classifier.thresholds().warning(),
            critical = self.classifier.thresholds().critical(),
            policy = self.dispatcher.policy_name(),
            alerts = self.dispatcher.has_sink(),
            "Monitor started"
        );

        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait() => break,
                _ = sleep(self.config.interval) => {}
            }
            if shutdown.is_shutdown() || !running.load(Ordering::Acquire) {
                break;
            }
            self.tick().await;
        }

        running.store(false, Ordering::Release);
        info!(
            cycles = self.report.cycles,
            skipped = self.report.skipped,
            alerts_sent = self.report.alerts_sent,
            final_level = %self.report.final_level,
            "Monitor stopped"
        );
        self.report
    }

    /// One sampling cycle
    ///
    /// Returns `None` when the source could not deliver a snapshot.
    pub async fn tick(&mut self) -> Option<Classification> {
        let snapshot = match self.source.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "Stats snapshot unavailable, skipping cycle");
                self.report.skipped += 1;
                return None;
            }
        };
        self.report.cycles += 1;

        let figures = aggregate(&snapshot);
        let status = figures.status_text();
        if self.last_status.as_deref() != Some(status.as_str()) {
            self.log(&status);
            self.last_status = Some(status);
        }

        let classification = self.classifier.classify(&figures);
        if let Some(change) = &classification.change {
            info!(
                previous = %change.previous,
                current = %change.current,
                load = %classification.load,
                "Load level changed"
            );
            self.log(&change.message);
        }

        if self.dispatcher.wants_alert(&classification) {
            let message = match &classification.change {
                Some(change) => change.message.clone(),
                None => {
                    // repeated alert under cooldown
                    let message = self.classifier.describe(classification.level, &figures);
                    self.log(&message);
                    message
                }
            };
            let outcome = self
                .dispatcher
                .notify(classification.level, &message, classification.load)
                .await;
            if outcome == DispatchOutcome::Sent {
                self.report.alerts_sent += 1;
            }
        }

        self.report.final_level = classification.level;
        Some(classification)
    }

    /// Format and emit a status line; writer failures are logged and dropped
    fn log(&self, message: &str) {
        let line = format!(
            "[{}][{}] {}",
            format_timestamp(self.time_provider.now_millis()),
            self.config.label,
            message
        );
        if let Err(e) = self.log_writer.write_line(&line) {
            warn!(error = %e, "Log writer rejected status line");
        }
    }
}

fn format_timestamp(millis: i64) -> String {
    match Utc.timestamp_millis_opt(millis).single() {
        Some(time) => time.format(LOG_TIMESTAMP_FORMAT).to_string(),
        None => millis.to_string(),
    }
}

/// Control handle of a spawned monitor
///
/// Dropping the handle stops the loop at its next wake-up.
pub struct MonitorHandle {
    shutdown: ShutdownSender,
    running: Arc<AtomicBool>,
    task: JoinHandle<MonitorReport>,
}

impl MonitorHandle {
    pub fn state(&self) -> MonitorState {
        if self.running.load(Ordering::Acquire) {
            MonitorState::Running
        } else {
            MonitorState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == MonitorState::Running
    }

    /// Request the loop to stop; it exits at its next wake-up
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
        self.shutdown.shutdown();
    }

    /// React to a host lifecycle event; returns true when it stopped the loop
    pub fn on_state_change(&self, event: &LifecycleEvent) -> bool {
        if !event.stops_monitor() {
            return false;
        }
        info!(event = ?event, "Lifecycle event stops monitor");
        self.stop();
        true
    }

    /// Wait for the loop to exit and return its report
    pub async fn join(self) -> Result<MonitorReport> {
        let MonitorHandle { shutdown, task, .. } = self;
        let report = task
            .await
            .map_err(|e| AppError::Internal(format!("monitor task failed: {}", e)));
        drop(shutdown);
        report
    }
}
