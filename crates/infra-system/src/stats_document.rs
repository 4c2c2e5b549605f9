// Stats document parsing
// reason: serde for the JSON stats format exposed by the server's control endpoint
//
// Single mode:  {"running": 5, "backlog": 0, "pool_capacity": 3, "max_threads": 8, ...}
// Cluster mode: {"workers": 2, "booted_workers": 2,
//                "worker_status": [{"pid": 1, "last_status": {"running": 5, ...}}, ...]}
use serde::Deserialize;

use poolwatch_core::domain::{StatsSnapshot, WorkerStatus};
use poolwatch_core::port::StatsSourceError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StatsDocument {
    booted_workers: Option<u32>,
    worker_status: Option<Vec<WorkerEntry>>,
    #[serde(flatten)]
    totals: Counters,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WorkerEntry {
    last_status: Option<Counters>,
}

/// Wire counters; absent and `null` both read as zero
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Counters {
    running: Option<u64>,
    backlog: Option<u64>,
    pool_capacity: Option<u64>,
    max_threads: Option<u64>,
}

impl From<Counters> for WorkerStatus {
    fn from(c: Counters) -> Self {
        WorkerStatus::new(
            c.running.unwrap_or(0),
            c.backlog.unwrap_or(0),
            c.pool_capacity.unwrap_or(0),
            c.max_threads.unwrap_or(0),
        )
    }
}

/// Parse a stats document into a snapshot
///
/// Unknown keys are ignored; missing or `null` counters read as zero. Only
/// invalid JSON (or a non-object document) is an error.
pub fn parse_stats_document(raw: &str) -> Result<StatsSnapshot, StatsSourceError> {
    let document: StatsDocument =
        serde_json::from_str(raw).map_err(|e| StatsSourceError::Malformed(e.to_string()))?;

    let entries = document.worker_status.unwrap_or_default();
    if entries.is_empty() {
        return Ok(StatsSnapshot::single(document.totals.into()));
    }

    let workers = entries
        .into_iter()
        .map(|entry| entry.last_status.unwrap_or_default().into())
        .collect();
    let snapshot = StatsSnapshot::cluster(workers);

    Ok(match document.booted_workers {
        Some(booted) => snapshot.with_booted_workers(booted),
        None => snapshot,
    })
}
