//! Single-threaded depth-first descent into one subtree

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, trace};

use super::state::SearchState;
use super::types::{DirectoryEntry, SearchConfig};

/// Walk `entry` and everything beneath it, recording matches in `state`.
///
/// Cancellation is checked on every visit. Directories that cannot be listed
/// are skipped; nothing is propagated to the caller.
pub fn descend(entry: &DirectoryEntry, config: &SearchConfig, state: &SearchState) {
    if state.is_cancelled() {
        return;
    }
    state.record_visit();

    if config.directories_only && !entry.is_dir() {
        return;
    }

    // A match is a leaf
    if config.predicate.is_match(entry) {
        if state.record_match(entry.path(), config.stop_on_first) {
            trace!(path = %entry.path().display(), "Match recorded");
        }
        return;
    }

    if !entry.is_dir() {
        return;
    }

    let children = match list_children(entry.path(), config.follow_symlinks) {
        Ok(children) => children,
        Err(e) => {
            state.record_listing_failure();
            debug!(path = %entry.path().display(), error = %e, "Skipping unreadable directory");
            return;
        }
    };

    for child in children {
        if state.is_cancelled() {
            return;
        }
        match child {
            Ok(child) => descend(&child, config, state),
            Err(e) => {
                debug!(parent = %entry.path().display(), error = %e, "Skipping unreadable entry");
            }
        }
    }
}

/// List the immediate children of `dir`.
///
/// The outer error means the directory itself could not be opened; inner
/// errors belong to individual children.
pub fn list_children(
    dir: &Path,
    follow_symlinks: bool,
) -> io::Result<impl Iterator<Item = io::Result<DirectoryEntry>>> {
    let read_dir = fs::read_dir(dir)?;
    Ok(read_dir.map(move |entry| {
        entry.and_then(|entry| DirectoryEntry::from_dir_entry(entry, follow_symlinks))
    }))
}
