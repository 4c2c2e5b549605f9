// File-backed stats source
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::stats_document::parse_stats_document;
use poolwatch_core::domain::StatsSnapshot;
use poolwatch_core::port::{StatsSource, StatsSourceError};

/// Reads a stats document that the server (or a sidecar) keeps refreshed on disk
pub struct FileStatsSource {
    path: PathBuf,
}

impl FileStatsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StatsSource for FileStatsSource {
    async fn snapshot(&self) -> Result<StatsSnapshot, StatsSourceError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            StatsSourceError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), bytes = raw.len(), "Stats document read");
        parse_stats_document(&raw)
    }
}
