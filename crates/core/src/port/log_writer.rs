// Log writer port

use super::SinkError;

/// Single-argument text sink for status lines
///
/// The monitor formats complete lines (timestamp, label, message); writers
/// only deliver them.
pub trait LogWriter: Send + Sync {
    fn write_line(&self, line: &str) -> Result<(), SinkError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    /// Log writer that keeps every line in memory
    #[derive(Clone, Default)]
    pub struct RecordingLogWriter {
        lines: Arc<Mutex<Vec<String>>>,
        failing: Arc<AtomicBool>,
    }

    impl RecordingLogWriter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }

        /// Lines containing `needle`
        pub fn matching(&self, needle: &str) -> Vec<String> {
            self.lines()
                .into_iter()
                .filter(|line| line.contains(needle))
                .collect()
        }
    }

    impl LogWriter for RecordingLogWriter {
        fn write_line(&self, line: &str) -> Result<(), SinkError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(SinkError::Rejected("log writer closed".to_string()));
            }
            self.lines.lock().unwrap().push(line.to_string());
            Ok(())
        }
    }
}
