use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::descender::{descend, list_children};
use super::error::SearchError;
use super::state::SearchState;
use super::types::{DirectoryEntry, SearchConfig, SearchResult};
use crate::parallel::{self, ParallelConfig};

/// Default number of ancestor levels searched above the start path
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Drives the outward walk from a start path toward the filesystem root.
///
/// # Level Flow
///
/// ```text
/// level 0   start/            children of start, all searched
///    │
/// level 1   start/..          children except start
///    │
/// level 2   start/../..       children except start/..
///    ⋮      (stops at max_depth, the root, or cancellation)
/// ```
///
/// Each level hands its sibling entries to the [`parallel`] executor, which
/// runs one descent per entry and returns only once all of them finished.
/// The next level never starts while a task of the previous one is running.
#[derive(Debug)]
pub struct LevelCoordinator<'c> {
    config: &'c SearchConfig,
    parallel: ParallelConfig,
}

impl<'c> LevelCoordinator<'c> {
    pub fn new(config: &'c SearchConfig) -> Self {
        Self {
            config,
            parallel: ParallelConfig::default(),
        }
    }

    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Search outward from `start_path`, at most `max_depth` levels above it.
    ///
    /// The start path is canonicalized first. A start path that cannot be
    /// resolved or listed is an error; listing failures further up are
    /// treated as empty levels.
    pub fn search(&self, start_path: &Path, max_depth: usize) -> Result<SearchResult, SearchError> {
        let started = Instant::now();
        let start = fs::canonicalize(start_path).map_err(|source| SearchError::StartPath {
            path: start_path.to_path_buf(),
            source,
        })?;

        info!(
            start = %start.display(),
            max_depth,
            stop_on_first = self.config.stop_on_first,
            directories_only = self.config.directories_only,
            "Starting outward search"
        );

        let state = SearchState::new();
        let mut current = start.clone();
        let mut excluded = start;
        let mut depth = 0;
        let mut levels_searched = 0;

        while depth <= max_depth {
            let siblings = match self.level_entries(&current, &excluded) {
                Ok(siblings) => siblings,
                Err(source) if depth == 0 => {
                    return Err(SearchError::StartPathNotListable {
                        path: current,
                        source,
                    });
                }
                Err(e) => {
                    state.record_listing_failure();
                    debug!(dir = %current.display(), error = %e, "Cannot list level, treating as empty");
                    Vec::new()
                }
            };

            let strategy = self.parallel.strategy_for(siblings.len());
            debug!(
                level = depth,
                dir = %current.display(),
                tasks = siblings.len(),
                strategy = %strategy.describe(),
                "Searching level"
            );

            state.record_tasks(siblings.len());
            let failures = parallel::execute(strategy, &siblings, |entry| {
                descend(entry, self.config, &state)
            });
            levels_searched += 1;

            if let Some(failure) = failures.into_iter().next() {
                // A failure outside any single task is attributed to the level itself
                let path = failure
                    .index
                    .and_then(|index| siblings.get(index))
                    .map_or_else(|| current.clone(), |entry| entry.path().to_path_buf());
                warn!(level = depth, path = %path.display(), "Search task panicked: {}", failure.message);
                return Err(SearchError::TaskPanicked {
                    level: depth,
                    path,
                    message: failure.message,
                });
            }

            if state.is_cancelled() {
                debug!(level = depth, "Search cancelled, not moving outward");
                break;
            }

            let parent = match current.parent() {
                Some(parent) if !parent.as_os_str().is_empty() && parent != current.as_path() => {
                    parent.to_path_buf()
                }
                _ => break,
            };
            excluded = std::mem::replace(&mut current, parent);
            depth += 1;
        }

        let result = state.into_result(levels_searched, started.elapsed());
        info!(
            matches = result.matches.len(),
            levels = result.stats.levels_searched,
            visited = result.stats.entries_visited,
            duration_ms = result.stats.duration_ms,
            "Search finished"
        );
        Ok(result)
    }

    /// Children of `dir` except `excluded`, the subtree searched one level down
    fn level_entries(&self, dir: &Path, excluded: &Path) -> io::Result<Vec<DirectoryEntry>> {
        let mut siblings = Vec::new();
        for child in list_children(dir, self.config.follow_symlinks)? {
            match child {
                Ok(child) if child.path() == excluded => {}
                Ok(child) => siblings.push(child),
                Err(e) => debug!(dir = %dir.display(), error = %e, "Skipping unreadable entry"),
            }
        }
        Ok(siblings)
    }
}

/// Search outward from `start_path` with the default execution settings
pub fn search(
    start_path: impl AsRef<Path>,
    config: &SearchConfig,
    max_depth: usize,
) -> Result<SearchResult, SearchError> {
    LevelCoordinator::new(config).search(start_path.as_ref(), max_depth)
}

/// Convenience wrapper returning the first match, if any
pub fn find_first<P: AsRef<Path>>(
    start_path: P,
    config: SearchConfig,
    max_depth: usize,
) -> Result<Option<PathBuf>, SearchError> {
    let config = config.stop_on_first(true);
    let result = search(start_path, &config, max_depth)?;
    Ok(result.matches.into_iter().next())
}
