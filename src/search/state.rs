use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::types::{SearchResult, SearchStats};

/// Cooperative stop signal shared by every task of one search.
///
/// The flag only ever moves from `false` to `true`.
#[derive(Debug, Default)]
pub struct CancellationToken {
    cancelled: AtomicBool,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Mutable state for one search invocation.
///
/// Created by the coordinator, borrowed by every task for the duration of
/// the call and turned into a [`SearchResult`] once all levels are done.
#[derive(Debug, Default)]
pub struct SearchState {
    matches: Mutex<Vec<PathBuf>>,
    cancelled: CancellationToken,
    entries_visited: AtomicUsize,
    tasks_spawned: AtomicUsize,
    listing_failures: AtomicUsize,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.is_cancelled()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancelled
    }

    /// Append a match. With `stop_on_first` the append and the cancel happen
    /// under the same lock, and a match arriving after cancellation is
    /// dropped. Returns whether the path was recorded.
    pub fn record_match(&self, path: &Path, stop_on_first: bool) -> bool {
        let mut matches = self.lock_matches();
        if stop_on_first {
            if self.cancelled.is_cancelled() {
                return false;
            }
            matches.push(path.to_path_buf());
            self.cancelled.cancel();
        } else {
            matches.push(path.to_path_buf());
        }
        true
    }

    pub fn match_count(&self) -> usize {
        self.lock_matches().len()
    }

    pub(crate) fn record_visit(&self) {
        self.entries_visited.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_tasks(&self, count: usize) {
        self.tasks_spawned.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn record_listing_failure(&self) {
        self.listing_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn into_result(self, levels_searched: usize, elapsed: Duration) -> SearchResult {
        let cancelled = self.cancelled.is_cancelled();
        let stats = SearchStats {
            levels_searched,
            entries_visited: self.entries_visited.into_inner(),
            tasks_spawned: self.tasks_spawned.into_inner(),
            listing_failures: self.listing_failures.into_inner(),
            duration_ms: elapsed.as_millis() as u64,
        };
        // A panicking task never holds the lock while half-way through a push
        let matches = self
            .matches
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);

        SearchResult {
            matches,
            cancelled,
            stats,
        }
    }

    fn lock_matches(&self) -> MutexGuard<'_, Vec<PathBuf>> {
        self.matches.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
