use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The kind of a traversed filesystem entry, cached at listing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    /// A symbolic link that was not followed
    Symlink,
    /// Device files, pipes, sockets, dangling links
    Other,
}

/// A filesystem entry seen during a search
///
/// Holds the path and the type information captured when the parent
/// directory was listed. It is a plain value, not an open handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    path: PathBuf,
    kind: EntryKind,
}

impl DirectoryEntry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Build an entry by querying the filesystem for `path`
    pub fn from_path(path: impl Into<PathBuf>, follow_symlinks: bool) -> io::Result<Self> {
        let path = path.into();
        let metadata = fs::symlink_metadata(&path)?;
        let kind = resolve_kind(&path, metadata.file_type(), follow_symlinks);
        Ok(Self { path, kind })
    }

    pub(crate) fn from_dir_entry(entry: fs::DirEntry, follow_symlinks: bool) -> io::Result<Self> {
        let file_type = entry.file_type()?;
        let path = entry.path();
        let kind = resolve_kind(&path, file_type, follow_symlinks);
        Ok(Self { path, kind })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Final path component, lossily converted to UTF-8
    pub fn name(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_else(|| self.path.to_string_lossy())
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

fn resolve_kind(path: &Path, file_type: fs::FileType, follow_symlinks: bool) -> EntryKind {
    if file_type.is_symlink() {
        if !follow_symlinks {
            return EntryKind::Symlink;
        }
        // Dangling links fall through to Other
        return match fs::metadata(path) {
            Ok(target) if target.is_dir() => EntryKind::Dir,
            Ok(target) if target.is_file() => EntryKind::File,
            _ => EntryKind::Other,
        };
    }

    if file_type.is_dir() {
        EntryKind::Dir
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}

/// Decides whether an entry is the search target.
///
/// Predicates are invoked concurrently from many threads, so they must be
/// `Send + Sync` and must not rely on mutable state of their own.
/// Any `Fn(&DirectoryEntry) -> bool` closure is a predicate.
pub trait Predicate: Send + Sync {
    fn is_match(&self, entry: &DirectoryEntry) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&DirectoryEntry) -> bool + Send + Sync,
{
    fn is_match(&self, entry: &DirectoryEntry) -> bool {
        self(entry)
    }
}

/// Search configuration, read-only once the search starts
pub struct SearchConfig {
    pub(crate) predicate: Box<dyn Predicate>,
    pub(crate) stop_on_first: bool,
    pub(crate) directories_only: bool,
    pub(crate) follow_symlinks: bool,
}

impl SearchConfig {
    pub fn new<P: Predicate + 'static>(predicate: P) -> Self {
        Self {
            predicate: Box::new(predicate),
            stop_on_first: false,
            directories_only: false,
            follow_symlinks: true,
        }
    }

    /// Stop every task as soon as one match is recorded
    pub fn stop_on_first(mut self, enabled: bool) -> Self {
        self.stop_on_first = enabled;
        self
    }

    /// Only match and descend into directories; files are pruned entirely
    pub fn directories_only(mut self, enabled: bool) -> Self {
        self.directories_only = enabled;
        self
    }

    /// Treat symlinks to directories as directories (the default).
    ///
    /// Disabling this makes every symlink a leaf that is never listed and is
    /// pruned under [`directories_only`](Self::directories_only).
    pub fn follow_symlinks(mut self, enabled: bool) -> Self {
        self.follow_symlinks = enabled;
        self
    }

    pub fn is_stop_on_first(&self) -> bool {
        self.stop_on_first
    }

    pub fn is_directories_only(&self) -> bool {
        self.directories_only
    }

    pub fn is_follow_symlinks(&self) -> bool {
        self.follow_symlinks
    }

    pub fn predicate(&self) -> &dyn Predicate {
        self.predicate.as_ref()
    }
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("stop_on_first", &self.stop_on_first)
            .field("directories_only", &self.directories_only)
            .field("follow_symlinks", &self.follow_symlinks)
            .finish_non_exhaustive()
    }
}

/// Statistics from a search operation
#[derive(Debug, Default, Clone, Serialize)]
pub struct SearchStats {
    /// Outward levels whose siblings were searched
    pub levels_searched: usize,
    pub entries_visited: usize,
    pub tasks_spawned: usize,
    /// Directories skipped because they could not be listed
    pub listing_failures: usize,
    pub duration_ms: u64,
}

/// Result of a search operation
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Matched paths; order across concurrent tasks is unspecified
    pub matches: Vec<PathBuf>,
    /// Whether the search stopped early on a match
    pub cancelled: bool,
    pub stats: SearchStats,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn first(&self) -> Option<&Path> {
        self.matches.first().map(PathBuf::as_path)
    }
}
