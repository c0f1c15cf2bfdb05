use serde::{Deserialize, Serialize};

/// How the tasks of one level are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Run every task on the calling thread
    Sequential,
    /// Fixed-size pool of worker threads draining a shared queue
    Parallel { workers: usize },
    /// One thread per task, no cap
    Unbounded,
}

impl ExecutionStrategy {
    /// Calculate the maximum number of workers from system resources.
    ///
    /// `thread_percentage` is applied to the CPU core count, then
    /// `max_threads` caps the result (0 means no cap).
    pub fn calculate_optimal_workers(max_threads: usize, thread_percentage: u8) -> usize {
        let cpu_cores = num_cpus::get();
        let max_by_percentage = std::cmp::max(1, (cpu_cores * thread_percentage as usize) / 100);

        if max_threads > 0 {
            std::cmp::min(max_threads, max_by_percentage)
        } else {
            max_by_percentage
        }
    }

    /// Pick sequential below `min_threshold` items, otherwise a pool of
    /// at most `workers` threads
    pub fn auto(work_item_count: usize, min_threshold: usize, workers: usize) -> Self {
        if work_item_count < min_threshold || workers <= 1 || work_item_count <= 1 {
            ExecutionStrategy::Sequential
        } else {
            ExecutionStrategy::Parallel {
                workers: workers.min(work_item_count),
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ExecutionStrategy::Sequential => "sequential".to_string(),
            ExecutionStrategy::Parallel { workers } => format!("parallel ({workers} workers)"),
            ExecutionStrategy::Unbounded => "unbounded".to_string(),
        }
    }
}

/// User-facing execution mode, resolved to an [`ExecutionStrategy`] per level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Sequential for small levels, bounded pool otherwise
    #[default]
    Auto,
    /// Always single-threaded
    Sequential,
    /// Always a bounded pool
    Parallel,
    /// One thread per sibling entry
    Unbounded,
}
