use crossbeam::channel::{unbounded, Receiver, Sender};
use crossbeam::thread::{Scope, ScopedJoinHandle};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use tracing::warn;

use super::core::{ExecutionMode, ExecutionStrategy};

/// Configuration for parallel processing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// How each level's tasks are scheduled
    pub mode: ExecutionMode,
    /// Maximum number of worker threads (0 = no cap)
    pub max_threads: usize,
    /// Percentage of CPU cores to use (1-100)
    pub thread_percentage: u8,
    /// Levels with fewer entries than this run sequentially in auto mode
    pub min_parallel_entries: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Auto,
            max_threads: 0,
            thread_percentage: 75,
            min_parallel_entries: 4,
        }
    }
}

impl ParallelConfig {
    /// Resolve the strategy for a batch of `work_count` tasks
    pub fn strategy_for(&self, work_count: usize) -> ExecutionStrategy {
        let max_workers =
            ExecutionStrategy::calculate_optimal_workers(self.max_threads, self.thread_percentage);

        match self.mode {
            ExecutionMode::Sequential => ExecutionStrategy::Sequential,
            ExecutionMode::Unbounded => ExecutionStrategy::Unbounded,
            ExecutionMode::Parallel => ExecutionStrategy::Parallel {
                workers: std::cmp::min(max_workers, work_count.max(1)),
            },
            ExecutionMode::Auto => {
                ExecutionStrategy::auto(work_count, self.min_parallel_entries, max_workers)
            }
        }
    }
}

/// A task that panicked instead of completing
#[derive(Debug, Clone)]
pub struct TaskFailure {
    /// Index of the work item in the submitted slice, `None` when a worker
    /// thread died outside of any single task
    pub index: Option<usize>,
    pub message: String,
}

/// Settings for the scoped threads spawned for one batch
#[derive(Debug, Clone, Copy, Default)]
struct WorkerThreads {
    stack_size: Option<usize>,
}

impl WorkerThreads {
    fn spawn<'scope, 'env, F, R>(
        &self,
        scope: &'scope Scope<'env>,
        f: F,
    ) -> io::Result<ScopedJoinHandle<'scope, R>>
    where
        F: FnOnce(&Scope<'env>) -> R + Send + 'env,
        R: Send + 'env,
    {
        let mut builder = scope.builder().name("backsearch-worker".to_string());
        if let Some(size) = self.stack_size {
            builder = builder.stack_size(size);
        }
        builder.spawn(f)
    }
}

/// Run `task` once per item and return only after every call has finished.
///
/// This is the barrier between levels: no task started here is still running
/// when the function returns. A panicking task is caught and reported as a
/// [`TaskFailure`]; the remaining items are still processed. Items whose
/// thread cannot be spawned run on the calling thread instead.
pub fn execute<T, F>(strategy: ExecutionStrategy, items: &[T], task: F) -> Vec<TaskFailure>
where
    T: Sync,
    F: Fn(&T) + Sync,
{
    execute_with(WorkerThreads::default(), strategy, items, task)
}

fn execute_with<T, F>(
    threads: WorkerThreads,
    strategy: ExecutionStrategy,
    items: &[T],
    task: F,
) -> Vec<TaskFailure>
where
    T: Sync,
    F: Fn(&T) + Sync,
{
    if items.is_empty() {
        return Vec::new();
    }

    let mut failures = match strategy {
        ExecutionStrategy::Sequential => items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| run_guarded(index, || task(item)))
            .collect(),
        ExecutionStrategy::Parallel { workers } => {
            execute_pool(threads, workers.max(1), items, &task)
        }
        ExecutionStrategy::Unbounded => execute_unbounded(threads, items, &task),
    };
    failures.sort_by_key(|failure| failure.index);
    failures
}

fn execute_pool<T, F>(threads: WorkerThreads, workers: usize, items: &[T], task: &F) -> Vec<TaskFailure>
where
    T: Sync,
    F: Fn(&T) + Sync,
{
    // Queue every item up front and close the channel so workers exit once drained
    let (work_tx, work_rx): (Sender<(usize, &T)>, Receiver<(usize, &T)>) = unbounded();
    for work_item in items.iter().enumerate() {
        if work_tx.send(work_item).is_err() {
            break;
        }
    }
    drop(work_tx);

    let scope_result = crossbeam::thread::scope(|s| {
        let mut handles = Vec::new();
        for _ in 0..workers.min(items.len()) {
            let work_rx = work_rx.clone();
            match threads.spawn(s, move |_| drain_queue(&work_rx, task)) {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    warn!(spawned = handles.len(), error = %e, "Could not spawn worker thread");
                    break;
                }
            }
        }

        // With no worker at all the queue is drained here
        let mut failures = if handles.is_empty() {
            drain_queue(&work_rx, task)
        } else {
            Vec::new()
        };
        for handle in handles {
            match handle.join() {
                Ok(worker_failures) => failures.extend(worker_failures),
                Err(payload) => failures.push(TaskFailure {
                    index: None,
                    message: panic_message(payload.as_ref()),
                }),
            }
        }
        failures
    });

    scope_result.unwrap_or_else(|payload| vec![scope_failure(payload)])
}

fn execute_unbounded<T, F>(threads: WorkerThreads, items: &[T], task: &F) -> Vec<TaskFailure>
where
    T: Sync,
    F: Fn(&T) + Sync,
{
    let scope_result = crossbeam::thread::scope(|s| {
        let mut failures = Vec::new();
        let mut handles = Vec::with_capacity(items.len());
        let mut inline = 0usize;

        for (index, item) in items.iter().enumerate() {
            match threads.spawn(s, move |_| task(item)) {
                Ok(handle) => handles.push((index, handle)),
                Err(e) => {
                    if inline == 0 {
                        warn!(index, error = %e, "Could not spawn task thread, running inline");
                    }
                    inline += 1;
                    failures.extend(run_guarded(index, || task(item)));
                }
            }
        }

        for (index, handle) in handles {
            if let Err(payload) = handle.join() {
                failures.push(TaskFailure {
                    index: Some(index),
                    message: panic_message(payload.as_ref()),
                });
            }
        }
        if inline > 0 {
            warn!(inline, total = items.len(), "Tasks ran on the coordinating thread");
        }
        failures
    });

    scope_result.unwrap_or_else(|payload| vec![scope_failure(payload)])
}

fn drain_queue<T, F>(work_rx: &Receiver<(usize, &T)>, task: &F) -> Vec<TaskFailure>
where
    F: Fn(&T),
{
    let mut failures = Vec::new();
    while let Ok((index, item)) = work_rx.recv() {
        if let Some(failure) = run_guarded(index, || task(item)) {
            failures.push(failure);
        }
    }
    failures
}

fn run_guarded<F: FnOnce()>(index: usize, f: F) -> Option<TaskFailure> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .err()
        .map(|payload| TaskFailure {
            index: Some(index),
            message: panic_message(payload.as_ref()),
        })
}

fn scope_failure(payload: Box<dyn Any + Send>) -> TaskFailure {
    TaskFailure {
        index: None,
        message: panic_message(payload.as_ref()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker thread panicked".to_string()
    }
}
