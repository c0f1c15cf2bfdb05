//! Name predicates built from command-line patterns
//!
//! These are the ready-made [`Predicate`]s the CLI hands to the search engine.
//! Glob patterns containing a path separator are matched against the entry's
//! full path; every other pattern is matched against the file name only.

use anyhow::{bail, Context, Result};
use globset::GlobSet;
use regex::{RegexSet, RegexSetBuilder};
use serde::{Deserialize, Serialize};

use super::glob::{build_globset, is_path_pattern};
use crate::search::{DirectoryEntry, Predicate};

/// How search patterns are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    /// Shell-style glob (`*.toml`, `src/**/mod.rs`)
    #[default]
    Glob,
    /// Regular expression matched against the file name
    Regex,
    /// File extension, with or without the leading dot
    Ext,
    /// Exact file name
    Name,
}

#[derive(Debug)]
enum NameMatcher {
    Glob { names: GlobSet, paths: GlobSet },
    Regex(RegexSet),
    Extension(Vec<String>),
    Exact(Vec<String>),
}

/// Predicate matching entries by name, extension, glob or regex
#[derive(Debug)]
pub struct NamePredicate {
    matcher: NameMatcher,
    ignore_case: bool,
}

impl NamePredicate {
    pub fn new(kind: PatternKind, patterns: &[String], ignore_case: bool) -> Result<Self> {
        if patterns.is_empty() {
            bail!("At least one search pattern is required");
        }

        let matcher = match kind {
            PatternKind::Glob => {
                let (path_patterns, name_patterns): (Vec<String>, Vec<String>) = patterns
                    .iter()
                    .cloned()
                    .partition(|pattern| is_path_pattern(pattern));
                NameMatcher::Glob {
                    names: build_globset(&name_patterns, ignore_case)?,
                    paths: build_globset(&path_patterns, ignore_case)?,
                }
            }
            PatternKind::Regex => {
                let set = RegexSetBuilder::new(patterns)
                    .case_insensitive(ignore_case)
                    .build()
                    .context("Invalid regex pattern")?;
                NameMatcher::Regex(set)
            }
            PatternKind::Ext => NameMatcher::Extension(
                patterns
                    .iter()
                    .map(|ext| ext.trim_start_matches('.').to_string())
                    .collect(),
            ),
            PatternKind::Name => NameMatcher::Exact(patterns.to_vec()),
        };

        Ok(Self {
            matcher,
            ignore_case,
        })
    }

    fn same_text(&self, left: &str, right: &str) -> bool {
        if self.ignore_case {
            left.eq_ignore_ascii_case(right)
        } else {
            left == right
        }
    }
}

impl Predicate for NamePredicate {
    fn is_match(&self, entry: &DirectoryEntry) -> bool {
        match &self.matcher {
            NameMatcher::Glob { names, paths } => {
                let name_match = !names.is_empty()
                    && entry
                        .path()
                        .file_name()
                        .is_some_and(|name| names.is_match(name));
                name_match || (!paths.is_empty() && paths.is_match(entry.path()))
            }
            NameMatcher::Regex(set) => set.is_match(&entry.name()),
            NameMatcher::Extension(extensions) => entry
                .path()
                .extension()
                .map(|ext| ext.to_string_lossy())
                .is_some_and(|ext| extensions.iter().any(|wanted| self.same_text(&ext, wanted))),
            NameMatcher::Exact(names) => {
                let name = entry.name();
                names.iter().any(|wanted| self.same_text(&name, wanted))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::EntryKind;

    fn file(path: &str) -> DirectoryEntry {
        DirectoryEntry::new(path, EntryKind::File)
    }

    fn patterns(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn test_glob_matches_file_name() {
        let predicate = NamePredicate::new(PatternKind::Glob, &patterns(&["*.txt"]), false).unwrap();
        assert!(predicate.is_match(&file("/a/b/y.txt")));
        assert!(!predicate.is_match(&file("/a/b/y.rs")));
    }

    #[cfg(unix)]
    #[test]
    fn test_glob_with_separator_matches_full_path() {
        let predicate =
            NamePredicate::new(PatternKind::Glob, &patterns(&["**/src/main.rs"]), false).unwrap();
        assert!(predicate.is_match(&file("/repo/src/main.rs")));
        assert!(!predicate.is_match(&file("/repo/main.rs")));
    }

    #[test]
    fn test_regex_and_ignore_case() {
        let predicate =
            NamePredicate::new(PatternKind::Regex, &patterns(&["^readme"]), true).unwrap();
        assert!(predicate.is_match(&file("/docs/README.md")));
        assert!(!predicate.is_match(&file("/docs/CHANGELOG.md")));
    }

    #[test]
    fn test_extension_and_exact_name() {
        let ext = NamePredicate::new(PatternKind::Ext, &patterns(&[".toml", "lock"]), false).unwrap();
        assert!(ext.is_match(&file("/p/Cargo.toml")));
        assert!(ext.is_match(&file("/p/Cargo.lock")));
        assert!(!ext.is_match(&file("/p/toml")));

        let name = NamePredicate::new(PatternKind::Name, &patterns(&["Makefile"]), false).unwrap();
        assert!(name.is_match(&file("/p/Makefile")));
        assert!(!name.is_match(&file("/p/makefile")));
    }

    #[test]
    fn test_empty_or_invalid_patterns_fail() {
        assert!(NamePredicate::new(PatternKind::Glob, &[], false).is_err());
        assert!(NamePredicate::new(PatternKind::Regex, &patterns(&["("]), false).is_err());
    }
}
