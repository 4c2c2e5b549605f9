// Stats Snapshot Domain Model

use serde::{Deserialize, Serialize};

/// Thread-pool counters of one worker process.
///
/// In single-process mode the same shape carries the server-wide counters.
/// Every field defaults to zero when the source omits it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerStatus {
    /// Threads currently spawned
    pub running: u64,
    /// Requests waiting for a free thread
    pub backlog: u64,
    /// Idle threads able to take new work
    pub pool_capacity: u64,
    /// Configured thread ceiling
    pub max_threads: u64,
}

impl WorkerStatus {
    pub fn new(running: u64, backlog: u64, pool_capacity: u64, max_threads: u64) -> Self {
        Self {
            running,
            backlog,
            pool_capacity,
            max_threads,
        }
    }

    /// Element-wise sum (saturating, a bogus counter must not panic the monitor)
    pub fn saturating_add(self, other: Self) -> Self {
        Self {
            running: self.running.saturating_add(other.running),
            backlog: self.backlog.saturating_add(other.backlog),
            pool_capacity: self.pool_capacity.saturating_add(other.pool_capacity),
            max_threads: self.max_threads.saturating_add(other.max_threads),
        }
    }
}

/// One point-in-time read of server load.
///
/// `workers` empty means single-process mode and `totals` holds the counters.
/// Otherwise the server runs in cluster mode and `totals` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub totals: WorkerStatus,
    pub workers: Vec<WorkerStatus>,
    /// Workers that finished booting (cluster mode only)
    pub booted_workers: Option<u32>,
}

impl StatsSnapshot {
    /// Snapshot of a single-process server
    pub fn single(totals: WorkerStatus) -> Self {
        Self {
            totals,
            workers: Vec::new(),
            booted_workers: None,
        }
    }

    /// Snapshot of a clustered server
    pub fn cluster(workers: Vec<WorkerStatus>) -> Self {
        Self {
            totals: WorkerStatus::default(),
            workers,
            booted_workers: None,
        }
    }

    pub fn with_booted_workers(mut self, booted: u32) -> Self {
        self.booted_workers = Some(booted);
        self
    }

    pub fn is_clustered(&self) -> bool {
        !self.workers.is_empty()
    }
}
