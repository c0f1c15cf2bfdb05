//! # backsearch - Outward-Then-Downward Directory Search
//!
//! Finds files or directories near a starting point. The search walks up
//! toward the filesystem root one level at a time and, at every level,
//! searches each sibling subtree downward in parallel.
//!
//! ## Features
//!
//! - **Level barrier**: a level's tasks all finish before the next level starts
//! - **Early stop**: with `stop_on_first`, one shared token halts every task
//! - **Bounded concurrency**: sequential, worker-pool or one-thread-per-entry execution
//! - **Resilient traversal**: unreadable directories are skipped, not fatal
//!
//! ## Quick Start
//!
//! ```bash
//! # Find the nearest Cargo.toml around the current directory
//! backsearch find Cargo.toml --first
//!
//! # All markdown files up to three levels above ./docs
//! backsearch find '*.md' --start docs --max-depth 3
//! ```

pub mod cli;
pub mod config;
pub mod parallel;
pub mod search;
pub mod shared;

pub use cli::{Cli, Output};
pub use config::BacksearchConfig;
pub use search::{search, DirectoryEntry, SearchConfig, SearchError, SearchResult};

/// Result type alias for backsearch application operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
