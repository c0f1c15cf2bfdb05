//! Find command implementation
//!
//! Builds the predicate and search configuration from flags plus the layered
//! config, runs the search on a blocking thread and prints the matches.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::cli::Output;
use crate::config::BacksearchConfig;
use crate::parallel::ExecutionMode;
use crate::search::{LevelCoordinator, SearchConfig, SearchResult};
use crate::shared::{NamePredicate, PatternKind};

/// Exit code when the search ran but found nothing
const NO_MATCH_EXIT_CODE: u8 = 1;

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Patterns to look for (any of them may match)
    #[arg(value_name = "PATTERN", required = true)]
    pub patterns: Vec<String>,

    /// Directory to start from (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub start: Option<PathBuf>,

    /// Ancestor levels to search above the start directory
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,

    /// Stop at the first match
    #[arg(short, long, overrides_with = "no_first")]
    pub first: bool,

    /// Collect every match, even if the configuration says otherwise
    #[arg(long, overrides_with = "first")]
    pub no_first: bool,

    /// Only match directories
    #[arg(long, overrides_with = "no_dirs_only")]
    pub dirs_only: bool,

    /// Match files and directories
    #[arg(long, overrides_with = "dirs_only")]
    pub no_dirs_only: bool,

    /// Follow symbolic links to directories (default, no cycle detection)
    #[arg(short = 'L', long, overrides_with = "no_follow_symlinks")]
    pub follow_symlinks: bool,

    /// Treat symbolic links as leaves that are never descended
    #[arg(short = 'P', long, overrides_with = "follow_symlinks")]
    pub no_follow_symlinks: bool,

    /// How patterns are interpreted
    #[arg(short, long, value_enum)]
    pub kind: Option<PatternKind>,

    /// Case-insensitive matching
    #[arg(short, long, overrides_with = "no_ignore_case")]
    pub ignore_case: bool,

    /// Case-sensitive matching
    #[arg(long, overrides_with = "ignore_case")]
    pub no_ignore_case: bool,

    /// Processing mode for each level
    #[arg(long, value_enum)]
    pub mode: Option<ExecutionMode>,

    /// Maximum number of worker threads
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Show statistics after searching
    #[arg(long)]
    pub stats: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One path per line
    Text,
    /// JSON document with matches and statistics
    Json,
}

pub async fn execute(args: FindArgs, config_path: Option<&str>, output: &Output) -> Result<ExitCode> {
    // Unset flags become null and are filtered out before merging
    let overrides = serde_json::json!({
        "search": {
            "max_depth": args.max_depth,
            "stop_on_first": switch(args.first, args.no_first),
            "directories_only": switch(args.dirs_only, args.no_dirs_only),
            "follow_symlinks": switch(args.follow_symlinks, args.no_follow_symlinks),
            "pattern_kind": args.kind,
            "ignore_case": switch(args.ignore_case, args.no_ignore_case),
        },
        "parallel": {
            "mode": args.mode,
            "max_threads": args.threads,
        }
    });
    let config = BacksearchConfig::load(config_path, Some(overrides))?;
    let settings = &config.search;

    let predicate = NamePredicate::new(settings.pattern_kind, &args.patterns, settings.ignore_case)?;
    let search_config = SearchConfig::new(predicate)
        .stop_on_first(settings.stop_on_first)
        .directories_only(settings.directories_only)
        .follow_symlinks(settings.follow_symlinks);

    let start = match args.start {
        Some(start) => start,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    output.verbose(&format!(
        "Searching from {} ({} levels up, {:?} mode)",
        start.display(),
        settings.max_depth,
        config.parallel.mode
    ));

    let max_depth = settings.max_depth;
    let parallel = config.parallel.clone();
    let result = tokio::task::spawn_blocking(move || {
        LevelCoordinator::new(&search_config)
            .with_parallel(parallel)
            .search(&start, max_depth)
    })
    .await
    .context("Search task failed to complete")??;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => {
            for path in &result.matches {
                println!("{}", path.display());
            }
            if result.is_empty() {
                output.warning("No matches found");
            }
        }
    }

    if args.stats {
        print_stats(&result, output);
    }

    if result.is_empty() {
        Ok(ExitCode::from(NO_MATCH_EXIT_CODE))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Resolve a `--flag` / `--no-flag` pair; `None` leaves the configured value alone
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn print_stats(result: &SearchResult, output: &Output) {
    let stats = &result.stats;
    output.category("Statistics");
    output.summary_stats("Matches", result.matches.len());
    output.summary_stats("Levels searched", stats.levels_searched);
    output.summary_stats("Entries visited", stats.entries_visited);
    output.summary_stats("Tasks spawned", stats.tasks_spawned);
    output.summary_stats("Unreadable dirs", stats.listing_failures);
    output.summary_stats("Duration", format!("{} ms", stats.duration_ms));
    if result.cancelled {
        output.info("Stopped after the first match");
    }
}
