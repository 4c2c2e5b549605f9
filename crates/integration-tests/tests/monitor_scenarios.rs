//! End-to-end sampling scenarios
//!
//! Drives `MonitorLoop::tick` directly against in-memory ports, one cycle per
//! call, and checks status lines, level transitions and delivered alerts.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use poolwatch_core::application::{MonitorConfig, MonitorLoop};
use poolwatch_core::domain::{Alert, AlertSeverity, LoadLevel, StatsSnapshot, Thresholds, WorkerStatus};
use poolwatch_core::port::alert_sink::mocks::RecordingAlertSink;
use poolwatch_core::port::log_writer::mocks::RecordingLogWriter;
use poolwatch_core::port::stats_source::mocks::MockStatsSource;
use poolwatch_core::port::time_provider::mocks::ManualClock;
use poolwatch_core::port::CallbackAlertSink;

struct Fixture {
    source: MockStatsSource,
    writer: RecordingLogWriter,
    sink: RecordingAlertSink,
    clock: ManualClock,
    monitor: MonitorLoop,
}

fn fixture(config: MonitorConfig, initial: StatsSnapshot) -> Fixture {
    let source = MockStatsSource::new(initial);
    let writer = RecordingLogWriter::new();
    let sink = RecordingAlertSink::new();
    let clock = ManualClock::new(1_700_000_000_000);
    let monitor = MonitorLoop::new(
        config,
        Arc::new(source.clone()),
        Arc::new(writer.clone()),
        Some(Arc::new(sink.clone())),
        Arc::new(clock.clone()),
    )
    .unwrap();

    Fixture {
        source,
        writer,
        sink,
        clock,
        monitor,
    }
}

/// Single-mode snapshot with `busy` of `max` threads taken
fn single(busy: u64, max: u64) -> StatsSnapshot {
    StatsSnapshot::single(WorkerStatus::new(busy, 0, max - busy, max))
}

#[tokio::test]
async fn test_single_mode_warning() {
    let mut f = fixture(MonitorConfig::default(), single(8, 10));

    let classification = f.monitor.tick().await.unwrap();

    assert_eq!(classification.level, LoadLevel::Warning);
    assert!((classification.load - 0.8).abs() < 1e-9);
    assert_eq!(
        f.writer
            .matching("WARNING: thread pool load is more than 70% (8/10)")
            .len(),
        1
    );

    let alerts = f.sink.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, AlertSeverity::Warning);
    assert_eq!(
        alerts[0].message,
        "WARNING: thread pool load is more than 70% (8/10)"
    );
}

#[tokio::test]
async fn test_cluster_mode_normal_load() {
    // 11 of 20 threads available across two workers: load 0.45
    let snapshot = StatsSnapshot::cluster(vec![
        WorkerStatus::new(0, 0, 10, 10),
        WorkerStatus::new(9, 1, 1, 10),
    ]);
    let mut f = fixture(MonitorConfig::default(), snapshot);

    let classification = f.monitor.tick().await.unwrap();

    assert_eq!(classification.level, LoadLevel::Normal);
    assert!((classification.load - 0.45).abs() < 1e-9);
    assert!(classification.change.is_none());
    assert_eq!(
        f.writer.matching("cluster: 2/2 workers: 9/20 threads, 11 available, 1 backlog").len(),
        1
    );
    assert!(f.sink.alerts().is_empty());
}

#[tokio::test]
async fn test_critical_skips_straight_past_warning() {
    let mut f = fixture(MonitorConfig::default(), single(9, 10));

    let classification = f.monitor.tick().await.unwrap();

    assert_eq!(classification.level, LoadLevel::Critical);
    let alerts = f.sink.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, AlertSeverity::Error);
    assert_eq!(
        alerts[0].message,
        "CRITICAL: thread pool load is more than 85% (9/10)"
    );
}

#[tokio::test]
async fn test_hysteresis_alerts_once_per_transition() {
    let mut f = fixture(MonitorConfig::default(), single(8, 10));

    for _ in 0..5 {
        f.monitor.tick().await;
        f.clock.advance_secs(10);
    }
    // Load wobbles inside the warning band
    f.source.set_snapshot(single(7, 10));
    f.monitor.tick().await;

    assert_eq!(f.monitor.current_level(), LoadLevel::Warning);
    assert_eq!(f.sink.alerts().len(), 1);
    assert_eq!(f.writer.matching("WARNING:").len(), 1);
    assert_eq!(f.monitor.report().cycles, 6);
}

#[tokio::test]
async fn test_recovery_is_logged_but_not_alerted() {
    let mut f = fixture(MonitorConfig::default(), single(9, 10));
    f.monitor.tick().await;

    f.source.set_snapshot(single(1, 10));
    let classification = f.monitor.tick().await.unwrap();

    let change = classification.change.unwrap();
    assert_eq!(change.previous, LoadLevel::Critical);
    assert_eq!(change.current, LoadLevel::Normal);
    assert_eq!(
        f.writer
            .matching("INFO: thread pool load is back to normal values (1/10)")
            .len(),
        1
    );
    // Only the critical alert went out
    assert_eq!(f.sink.alerts().len(), 1);
    assert_eq!(f.monitor.report().alerts_sent, 1);
}

#[tokio::test]
async fn test_unchanged_status_logged_once() {
    let mut f = fixture(MonitorConfig::default(), single(2, 10));

    f.monitor.tick().await;
    f.monitor.tick().await;
    f.monitor.tick().await;
    assert_eq!(f.writer.matching("single: 2/10 threads").len(), 1);

    f.source.set_snapshot(single(3, 10));
    f.monitor.tick().await;
    assert_eq!(f.writer.matching("single: 3/10 threads").len(), 1);
    assert_eq!(f.writer.lines().len(), 2);
}

#[tokio::test]
async fn test_cooldown_repeats_while_elevated() {
    let config = MonitorConfig {
        alert_repeat: Some(Duration::from_secs(60)),
        ..Default::default()
    };
    let mut f = fixture(config, single(8, 10));

    f.monitor.tick().await;
    assert_eq!(f.sink.alerts().len(), 1);

    f.clock.advance_secs(30);
    f.monitor.tick().await;
    assert_eq!(f.sink.alerts().len(), 1);

    f.clock.advance_secs(30);
    f.monitor.tick().await;
    let alerts = f.sink.alerts();
    assert_eq!(alerts.len(), 2);
    assert_eq!(
        alerts[1].message,
        "WARNING: thread pool load is more than 70% (8/10)"
    );
    // Repeated alerts are logged like the first one
    assert_eq!(f.writer.matching("WARNING:").len(), 2);
}

#[tokio::test]
async fn test_custom_thresholds_and_label() {
    let config = MonitorConfig {
        thresholds: Thresholds::new(0.5, 0.9).unwrap(),
        label: "api-1".to_string(),
        ..Default::default()
    };
    let mut f = fixture(config, single(6, 10));

    let classification = f.monitor.tick().await.unwrap();

    assert_eq!(classification.level, LoadLevel::Warning);
    assert!(f
        .writer
        .lines()
        .iter()
        .all(|line| line.contains("][api-1] ")));
    assert_eq!(
        f.writer
            .matching("WARNING: thread pool load is more than 50% (6/10)")
            .len(),
        1
    );
}

#[tokio::test]
async fn test_failing_sink_keeps_monitoring() {
    let mut f = fixture(MonitorConfig::default(), single(8, 10));
    f.sink.set_failing(true);

    f.monitor.tick().await;
    assert_eq!(f.monitor.current_level(), LoadLevel::Warning);
    assert_eq!(f.monitor.report().alerts_sent, 0);

    f.sink.set_failing(false);
    f.source.set_snapshot(single(10, 10));
    f.monitor.tick().await;
    assert_eq!(f.monitor.current_level(), LoadLevel::Critical);
    assert_eq!(f.monitor.report().alerts_sent, 1);
}

#[tokio::test]
async fn test_callback_sink_receives_alerts() {
    let received: Arc<Mutex<Vec<Alert>>> = Arc::new(Mutex::new(Vec::new()));
    let store = Arc::clone(&received);
    let sink = CallbackAlertSink::new(move |alert: &Alert| {
        store.lock().unwrap().push(alert.clone());
        Ok(())
    });

    let mut monitor = MonitorLoop::new(
        MonitorConfig::default(),
        Arc::new(MockStatsSource::new(single(9, 10))),
        Arc::new(RecordingLogWriter::new()),
        Some(Arc::new(sink)),
        Arc::new(ManualClock::new(0)),
    )
    .unwrap();

    monitor.tick().await;

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].level, LoadLevel::Critical);
}

#[tokio::test]
async fn test_no_sink_only_logs() {
    let writer = RecordingLogWriter::new();
    let mut monitor = MonitorLoop::new(
        MonitorConfig::default(),
        Arc::new(MockStatsSource::new(single(9, 10))),
        Arc::new(writer.clone()),
        None,
        Arc::new(ManualClock::new(0)),
    )
    .unwrap();

    monitor.tick().await;

    assert_eq!(monitor.current_level(), LoadLevel::Critical);
    assert_eq!(writer.matching("CRITICAL:").len(), 1);
    assert_eq!(monitor.report().alerts_sent, 0);
}
