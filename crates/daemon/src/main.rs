//! poolwatch - Main Entry Point
//! Samples server thread-pool load and raises alerts on level changes

mod bootstrap;
mod logging;
mod settings;
mod signals;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info, warn};

use poolwatch_core::application::monitor::constants::STOP_GRACE_PERIOD;
use poolwatch_core::application::MonitorLoop;
use poolwatch_core::port::time_provider::SystemTimeProvider;
use settings::{Settings, DEFAULT_CONFIG_PATH};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    let _log_guard = logging::init_logging()?;

    info!("poolwatch v{} starting...", VERSION);

    // 2. Load configuration
    let config_path =
        std::env::var("POOLWATCH_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config_path = shellexpand::tilde(&config_path).into_owned();

    let settings = Settings::load(&config_path)
        .with_context(|| format!("Failed to load settings ({})", config_path))?;
    let monitor_config = settings
        .monitor_config()
        .context("Invalid monitor configuration")?;

    // 3. Setup dependencies (DI wiring)
    let source = bootstrap::build_stats_source(&settings.source)?;
    let sink = bootstrap::build_alert_sink(&settings)?;
    let log_writer = bootstrap::build_log_writer(settings.output);

    // 4. Start monitor
    let monitor = MonitorLoop::new(
        monitor_config,
        source,
        log_writer,
        sink,
        Arc::new(SystemTimeProvider),
    )?;
    let handle = monitor.start();

    info!("Monitor running. Press Ctrl+C to stop");

    // 5. Wait for a lifecycle signal
    let event = signals::wait_for_lifecycle_event().await?;
    handle.on_state_change(&event);

    // 6. Graceful shutdown
    match tokio::time::timeout(STOP_GRACE_PERIOD, handle.join()).await {
        Ok(Ok(report)) => info!(
            cycles = report.cycles,
            skipped = report.skipped,
            alerts_sent = report.alerts_sent,
            final_level = %report.final_level,
            "Shutdown complete."
        ),
        Ok(Err(e)) => error!(error = ?e, "Monitor task failed"),
        Err(_) => warn!("Monitor did not stop within the grace period"),
    }

    Ok(())
}
