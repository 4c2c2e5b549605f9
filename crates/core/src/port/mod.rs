// Port Layer - Interfaces for external collaborators

pub mod alert_sink;
pub mod log_writer;
pub mod stats_source;
pub mod time_provider; // For deterministic testing

// Re-exports
pub use alert_sink::{AlertSink, CallbackAlertSink, SinkError};
pub use log_writer::LogWriter;
pub use stats_source::{StatsSource, StatsSourceError};
pub use time_provider::TimeProvider;
