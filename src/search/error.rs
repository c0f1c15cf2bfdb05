//! Error types for the search engine
//!
//! Only conditions the caller can act on are surfaced here. Listing failures
//! below the start path are absorbed by the traversal and counted in
//! [`SearchStats`](super::SearchStats) instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    /// The start path does not exist or cannot be resolved
    #[error("Start path '{}' cannot be resolved", .path.display())]
    StartPath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The start path exists but its children cannot be listed
    #[error("Start path '{}' cannot be listed", .path.display())]
    StartPathNotListable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A search task panicked, usually inside the predicate
    #[error("Search task for '{}' panicked at level {level}: {message}", .path.display())]
    TaskPanicked {
        level: usize,
        path: PathBuf,
        message: String,
    },
}
