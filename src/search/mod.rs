//! Outward-then-downward directory search
//!
//! Starting from a path, the search walks up toward the filesystem root one
//! level at a time. At every level it searches each sibling subtree downward
//! in its own task, skipping the subtree covered by the level below.
//!
//! ```text
//!              /a                 level 1: descend into /a/x.txt, /a/d, ...
//!            ┌──┴───────┐
//!          /a/b       /a/d        level 0: descend into /a/b/c, /a/b/y.txt
//!        ┌──┴──┐
//!     /a/b/c  y.txt
//! ```
//!
//! - [`descender`]: single-threaded recursive walk of one subtree
//! - [`coordinator`]: the outward loop, fan-out and per-level barrier
//! - [`state`]: per-call shared state and the cancellation token
//!
//! # Example
//!
//! ```rust,no_run
//! use backsearch::search::{search, DirectoryEntry, SearchConfig};
//!
//! let config = SearchConfig::new(|entry: &DirectoryEntry| entry.name() == "Cargo.toml")
//!     .stop_on_first(true);
//! let result = search(".", &config, 2)?;
//! if let Some(path) = result.first() {
//!     println!("found {}", path.display());
//! }
//! # Ok::<(), backsearch::search::SearchError>(())
//! ```

pub mod coordinator;
pub mod descender;
pub mod error;
pub mod state;
pub mod types;

pub use coordinator::{find_first, search, LevelCoordinator, DEFAULT_MAX_DEPTH};
pub use descender::descend;
pub use error::SearchError;
pub use state::{CancellationToken, SearchState};
pub use types::{DirectoryEntry, EntryKind, Predicate, SearchConfig, SearchResult, SearchStats};
