//! Process signals mapped to lifecycle events

use anyhow::Result;
use poolwatch_core::domain::LifecycleEvent;

/// Wait for the next terminating signal
///
/// ctrl-c is `Stop`, SIGTERM is `Halt`, SIGHUP is `Restart`.
#[cfg(unix)]
pub async fn wait_for_lifecycle_event() -> Result<LifecycleEvent> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    let mut hangup = signal(SignalKind::hangup())?;

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            Ok(LifecycleEvent::Stop)
        }
        _ = terminate.recv() => Ok(LifecycleEvent::Halt),
        _ = hangup.recv() => Ok(LifecycleEvent::Restart),
    }
}

#[cfg(not(unix))]
pub async fn wait_for_lifecycle_event() -> Result<LifecycleEvent> {
    tokio::signal::ctrl_c().await?;
    Ok(LifecycleEvent::Stop)
}
