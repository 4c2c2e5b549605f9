// Log writer implementations
use std::io::Write;

use poolwatch_core::port::{LogWriter, SinkError};

/// Forwards status lines to `tracing` under the `poolwatch::stats` target
pub struct TracingLogWriter;

impl LogWriter for TracingLogWriter {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        tracing::info!(target: "poolwatch::stats", "{}", line);
        Ok(())
    }
}

/// Prints status lines verbatim on stdout
pub struct StdoutLogWriter;

impl LogWriter for StdoutLogWriter {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", line)?;
        out.flush()?;
        Ok(())
    }
}
