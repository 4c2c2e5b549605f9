// Stats aggregation: snapshot -> flat utilization figures
use crate::domain::{StatsSnapshot, WorkerStatus};

/// Worker counts shown in the cluster status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterCounts {
    pub booted: u32,
    pub total: u32,
}

/// Server-wide thread-pool figures derived from one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtilizationFigures {
    pub running: u64,
    pub backlog: u64,
    pub pool_capacity: u64,
    pub max_threads: u64,
    /// `Some` when the snapshot came from a clustered server
    pub cluster: Option<ClusterCounts>,
}

impl UtilizationFigures {
    /// Utilization ratio `1 - pool_capacity / max_threads`, clamped to `[0, 1]`
    ///
    /// `max_threads == 0` means no load.
    pub fn load(&self) -> f64 {
        if self.max_threads == 0 {
            return 0.0;
        }
        (1.0 - self.pool_capacity as f64 / self.max_threads as f64).clamp(0.0, 1.0)
    }

    /// Threads not available for new work
    pub fn busy_threads(&self) -> u64 {
        self.max_threads.saturating_sub(self.pool_capacity)
    }

    /// Human-readable one-line summary
    pub fn status_text(&self) -> String {
        let threads = format!(
            "{}/{} threads, {} available, {} backlog",
            self.running, self.max_threads, self.pool_capacity, self.backlog
        );
        match self.cluster {
            Some(counts) => format!(
                "cluster: {}/{} workers: {}",
                counts.booted, counts.total, threads
            ),
            None => format!("single: {}", threads),
        }
    }
}

/// Flatten a snapshot into utilization figures
///
/// Cluster mode sums each counter across workers; single mode reads the
/// server-wide counters. Never fails: missing data is already zero.
pub fn aggregate(snapshot: &StatsSnapshot) -> UtilizationFigures {
    if !snapshot.is_clustered() {
        let totals = snapshot.totals;
        return UtilizationFigures {
            running: totals.running,
            backlog: totals.backlog,
            pool_capacity: totals.pool_capacity,
            max_threads: totals.max_threads,
            cluster: None,
        };
    }

    let sum = snapshot
        .workers
        .iter()
        .fold(WorkerStatus::default(), |acc, w| acc.saturating_add(*w));
    let total = u32::try_from(snapshot.workers.len()).unwrap_or(u32::MAX);

    UtilizationFigures {
        running: sum.running,
        backlog: sum.backlog,
        pool_capacity: sum.pool_capacity,
        max_threads: sum.max_threads,
        cluster: Some(ClusterCounts {
            booted: snapshot.booted_workers.unwrap_or(total),
            total,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_process_reads_fields_directly() {
        let snapshot = StatsSnapshot::single(WorkerStatus::new(10, 3, 2, 10));
        let figures = aggregate(&snapshot);

        assert_eq!(figures.running, 10);
        assert_eq!(figures.backlog, 3);
        assert_eq!(figures.pool_capacity, 2);
        assert_eq!(figures.max_threads, 10);
        assert!(figures.cluster.is_none());
        assert!((figures.load() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_cluster_sums_every_worker() {
        let snapshot = StatsSnapshot::cluster(vec![
            WorkerStatus::new(5, 1, 10, 10),
            WorkerStatus::new(9, 4, 1, 10),
            // worker that reported nothing yet
            WorkerStatus::default(),
        ]);
        let figures = aggregate(&snapshot);

        assert_eq!(figures.running, 14);
        assert_eq!(figures.backlog, 5);
        assert_eq!(figures.pool_capacity, 11);
        assert_eq!(figures.max_threads, 20);
        assert_eq!(
            figures.cluster,
            Some(ClusterCounts {
                booted: 3,
                total: 3
            })
        );
        assert!((figures.load() - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_zero_max_threads_is_no_load() {
        let figures = aggregate(&StatsSnapshot::default());
        assert_eq!(figures.load(), 0.0);

        let figures = aggregate(&StatsSnapshot::single(WorkerStatus::new(0, 7, 3, 0)));
        assert_eq!(figures.load(), 0.0);
        assert_eq!(figures.busy_threads(), 0);
    }

    #[test]
    fn test_excess_capacity_clamps_to_zero() {
        let figures = aggregate(&StatsSnapshot::single(WorkerStatus::new(0, 0, 12, 10)));
        assert_eq!(figures.load(), 0.0);
    }

    #[test]
    fn test_counter_overflow_saturates() {
        let snapshot = StatsSnapshot::cluster(vec![
            WorkerStatus::new(u64::MAX, 0, 0, 1),
            WorkerStatus::new(1, 0, 0, 1),
        ]);
        assert_eq!(aggregate(&snapshot).running, u64::MAX);
    }

    #[test]
    fn test_status_text_formats() {
        let single = aggregate(&StatsSnapshot::single(WorkerStatus::new(4, 1, 6, 10)));
        assert_eq!(
            single.status_text(),
            "single: 4/10 threads, 6 available, 1 backlog"
        );

        let cluster = aggregate(
            &StatsSnapshot::cluster(vec![
                WorkerStatus::new(2, 0, 3, 5),
                WorkerStatus::new(1, 2, 4, 5),
            ])
            .with_booted_workers(1),
        );
        assert_eq!(
            cluster.status_text(),
            "cluster: 1/2 workers: 3/10 threads, 7 available, 2 backlog"
        );
    }
}
