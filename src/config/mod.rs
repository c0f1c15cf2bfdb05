//! Configuration management for backsearch
//!
//! Settings are layered with figment (see [`core`]): embedded defaults, user
//! and project files, an explicit `--config` file, `BACKSEARCH_*` environment
//! variables and finally command-line overrides.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::parallel::ParallelConfig;
use crate::search::DEFAULT_MAX_DEPTH;
use crate::shared::PatternKind;

pub mod core;
pub mod overrides;
pub mod smart_load;

/// Main configuration structure for backsearch
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BacksearchConfig {
    /// Search behaviour
    pub search: SearchSettings,

    /// Execution strategy for each level
    pub parallel: ParallelConfig,
}

/// Search-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Ancestor levels searched above the start path
    pub max_depth: usize,

    /// Stop all tasks after the first match
    pub stop_on_first: bool,

    /// Restrict matching and descent to directories
    pub directories_only: bool,

    /// Treat symlinks to directories as directories
    pub follow_symlinks: bool,

    /// How search patterns are interpreted
    pub pattern_kind: PatternKind,

    /// Case-insensitive pattern matching
    pub ignore_case: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            stop_on_first: false,
            directories_only: false,
            follow_symlinks: true,
            pattern_kind: PatternKind::Glob,
            ignore_case: false,
        }
    }
}

impl BacksearchConfig {
    /// Reject values that would make the search misbehave
    pub fn validate(&self) -> Result<()> {
        let percentage = self.parallel.thread_percentage;
        if !(1..=100).contains(&percentage) {
            bail!("parallel.thread_percentage must be between 1 and 100, got {}", percentage);
        }
        if self.parallel.min_parallel_entries == 0 {
            bail!("parallel.min_parallel_entries must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::ExecutionMode;

    #[test]
    fn test_defaults_are_valid() {
        let config = BacksearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.max_depth, 2);
        assert_eq!(config.parallel.mode, ExecutionMode::Auto);
    }

    #[test]
    fn test_validate_rejects_bad_percentage() {
        let mut config = BacksearchConfig::default();
        config.parallel.thread_percentage = 0;
        assert!(config.validate().is_err());

        config.parallel.thread_percentage = 101;
        assert!(config.validate().is_err());
    }
}
