// Alert sink port
use crate::domain::Alert;
use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a log writer or an alert sink
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Sink rejected message: {0}")]
    Rejected(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outbound alerting channel
///
/// Delivery is best-effort: the dispatcher logs errors and moves on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn notify(&self, alert: &Alert) -> Result<(), SinkError>;
}

/// Alert sink backed by a caller-supplied callback
pub struct CallbackAlertSink<F> {
    callback: F,
}

impl<F> CallbackAlertSink<F>
where
    F: Fn(&Alert) -> Result<(), SinkError> + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

#[async_trait]
impl<F> AlertSink for CallbackAlertSink<F>
where
    F: Fn(&Alert) -> Result<(), SinkError> + Send + Sync,
{
    async fn notify(&self, alert: &Alert) -> Result<(), SinkError> {
        (self.callback)(alert)
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    /// Alert sink that records every alert it receives
    #[derive(Clone, Default)]
    pub struct RecordingAlertSink {
        alerts: Arc<Mutex<Vec<Alert>>>,
        failing: Arc<AtomicBool>,
    }

    impl RecordingAlertSink {
        pub fn new() -> Self {
            Self::default()
        }

        /// Reject every following alert (still recorded as attempted)
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub fn alerts(&self) -> Vec<Alert> {
            self.alerts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AlertSink for RecordingAlertSink {
        async fn notify(&self, alert: &Alert) -> Result<(), SinkError> {
            self.alerts.lock().unwrap().push(alert.clone());
            if self.failing.load(Ordering::SeqCst) {
                return Err(SinkError::Transport("alert channel down".to_string()));
            }
            Ok(())
        }
    }
}
