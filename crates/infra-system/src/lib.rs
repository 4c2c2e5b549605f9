// Poolwatch Infrastructure - System Adapters
// Implements: StatsSource, AlertSink, LogWriter

pub mod command_source;
pub mod file_source;
pub mod http_source;
pub mod log_writer_impl;
pub mod stats_document;
pub mod webhook_sink;

#[cfg(test)]
mod test_http;

pub use command_source::CommandStatsSource;
pub use file_source::FileStatsSource;
pub use http_source::HttpStatsSource;
pub use log_writer_impl::{StdoutLogWriter, TracingLogWriter};
pub use stats_document::parse_stats_document;
pub use webhook_sink::WebhookAlertSink;
