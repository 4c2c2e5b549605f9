// Monitor constants (No magic values)
use std::time::Duration;

/// Default sampling interval (10s)
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

/// Default prefix of every status line
pub const DEFAULT_LABEL: &str = "poolwatch";

/// How long the host waits for the loop to finish after stop (5s)
pub const STOP_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Timestamp layout of status lines
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";
