// Stats source port
// reason: async-trait, adapters read files, HTTP endpoints and subprocess output
use crate::domain::StatsSnapshot;
use async_trait::async_trait;
use thiserror::Error;

/// Failure to obtain a snapshot
#[derive(Error, Debug)]
pub enum StatsSourceError {
    #[error("Stats source unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed stats document: {0}")]
    Malformed(String),

    #[error("Stats read timed out after {0}ms")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Provider of point-in-time server load snapshots
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Read the current server load
    ///
    /// Called once per sampling cycle. Must be side-effect free; a failure
    /// only skips the current cycle.
    async fn snapshot(&self) -> Result<StatsSnapshot, StatsSourceError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Mock StatsSource returning a settable snapshot and counting reads
    #[derive(Clone)]
    pub struct MockStatsSource {
        snapshot: Arc<Mutex<StatsSnapshot>>,
        failure: Arc<Mutex<Option<String>>>,
        calls: Arc<AtomicUsize>,
    }

    impl MockStatsSource {
        pub fn new(snapshot: StatsSnapshot) -> Self {
            Self {
                snapshot: Arc::new(Mutex::new(snapshot)),
                failure: Arc::new(Mutex::new(None)),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn set_snapshot(&self, snapshot: StatsSnapshot) {
            *self.snapshot.lock().unwrap() = snapshot;
        }

        /// Make every following read fail (`None` restores normal reads)
        pub fn set_failure(&self, reason: Option<&str>) {
            *self.failure.lock().unwrap() = reason.map(str::to_string);
        }

        /// Number of snapshot reads so far
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StatsSource for MockStatsSource {
        async fn snapshot(&self) -> Result<StatsSnapshot, StatsSourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(reason) = self.failure.lock().unwrap().clone() {
                return Err(StatsSourceError::Unavailable(reason));
            }
            Ok(self.snapshot.lock().unwrap().clone())
        }
    }
}
