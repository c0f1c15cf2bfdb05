//! Glob pattern utilities
//!
//! This module builds the glob matchers used by name predicates

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Check if a pattern should be matched against the whole path instead of the file name
pub fn is_path_pattern(pattern: &str) -> bool {
    pattern.contains('/') || pattern.contains(std::path::MAIN_SEPARATOR)
}

/// Create a GlobSet from a list of patterns for efficient batch matching
///
/// Path patterns keep `*` from crossing separators, so `src/*.rs` does not
/// match `src/bin/main.rs`.
pub fn build_globset(patterns: &[String], case_insensitive: bool) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .literal_separator(is_path_pattern(pattern))
            .build()
            .with_context(|| format!("Invalid glob pattern '{}'", pattern))?;
        builder.add(glob);
    }

    Ok(builder.build()?)
}
