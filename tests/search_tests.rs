//! Search engine properties exercised through the public library API

use backsearch::parallel::{ExecutionMode, ParallelConfig};
use backsearch::search::{
    search, DirectoryEntry, LevelCoordinator, SearchConfig, SearchError, SearchResult,
};
use backsearch::shared::{NamePredicate, PatternKind};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// top/l1/l2/start plus a marker file at each level and a wide sibling fan-out
fn layered_tree() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let top = fs::canonicalize(temp_dir.path()).unwrap().join("top");
    let start = top.join("l1/l2/start");
    fs::create_dir_all(start.join("inner/deeper")).unwrap();

    fs::write(top.join("top.mark"), "").unwrap();
    fs::write(top.join("l1/l1.mark"), "").unwrap();
    fs::write(top.join("l1/l2/l2.mark"), "").unwrap();
    fs::write(start.join("inner/deeper/start.mark"), "").unwrap();

    for i in 0..16 {
        let sibling = top.join(format!("l1/l2/sibling{i}/nested"));
        fs::create_dir_all(&sibling).unwrap();
        fs::write(sibling.join(format!("s{i}.mark")), "").unwrap();
    }
    (temp_dir, top)
}

fn mark_config() -> SearchConfig {
    let predicate = NamePredicate::new(PatternKind::Ext, &["mark".to_string()], false).unwrap();
    SearchConfig::new(predicate)
}

fn start_of(top: &Path) -> PathBuf {
    top.join("l1/l2/start")
}

fn names(result: &SearchResult) -> HashSet<String> {
    result
        .matches
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_depth_bound_limits_ancestor_levels() {
    let (_guard, top) = layered_tree();

    let level0 = search(start_of(&top), &mark_config(), 0).unwrap();
    assert_eq!(names(&level0), HashSet::from(["start.mark".to_string()]));
    assert_eq!(level0.stats.levels_searched, 1);

    let level1 = search(start_of(&top), &mark_config(), 1).unwrap();
    assert_eq!(level1.matches.len(), 1 + 1 + 16);
    assert!(names(&level1).contains("l2.mark"));
    assert!(!names(&level1).contains("l1.mark"));

    let level2 = search(start_of(&top), &mark_config(), 2).unwrap();
    assert_eq!(level2.matches.len(), 1 + 1 + 16 + 1);
    assert!(names(&level2).contains("l1.mark"));
    assert!(!names(&level2).contains("top.mark"));
    assert_eq!(level2.stats.levels_searched, 3);
}

#[test]
fn test_all_matches_found_and_idempotent() {
    let (_guard, top) = layered_tree();
    let config = mark_config();

    let first: HashSet<PathBuf> = search(start_of(&top), &config, 3).unwrap().matches.into_iter().collect();
    let second: HashSet<PathBuf> = search(start_of(&top), &config, 3).unwrap().matches.into_iter().collect();

    assert_eq!(first.len(), 20);
    assert_eq!(first, second);
}

#[test]
fn test_single_target_found_with_stop_on_first() {
    let (_guard, top) = layered_tree();
    let target = top.join("l1/l2/sibling11/nested/s11.mark");
    let wanted = target.clone();
    let config = SearchConfig::new(move |entry: &DirectoryEntry| entry.path() == wanted.as_path())
        .stop_on_first(true);

    for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel, ExecutionMode::Unbounded] {
        let result = LevelCoordinator::new(&config)
            .with_parallel(ParallelConfig { mode, ..ParallelConfig::default() })
            .search(&start_of(&top), 2)
            .unwrap();

        assert_eq!(result.matches, vec![target.clone()], "{mode:?}");
        assert!(result.cancelled);
    }
}

#[test]
fn test_stop_on_first_yields_exactly_one_of_many() {
    let (_guard, top) = layered_tree();
    let config = mark_config().stop_on_first(true);

    for mode in [ExecutionMode::Parallel, ExecutionMode::Unbounded] {
        let result = LevelCoordinator::new(&config)
            .with_parallel(ParallelConfig { mode, ..ParallelConfig::default() })
            .search(&top.join("l1/l2"), 1)
            .unwrap();

        assert_eq!(result.matches.len(), 1, "{mode:?}");
        assert!(result.cancelled);
        // Cancellation at level 0 means no outward move
        assert_eq!(result.stats.levels_searched, 1);
    }
}

#[test]
fn test_cancellation_stops_predicate_calls() {
    let (_guard, top) = layered_tree();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let config = SearchConfig::new(move |_: &DirectoryEntry| {
        counter.fetch_add(1, Ordering::SeqCst);
        true
    })
    .stop_on_first(true);

    let sequential = ParallelConfig { mode: ExecutionMode::Sequential, ..ParallelConfig::default() };
    let result = LevelCoordinator::new(&config)
        .with_parallel(sequential)
        .search(&top.join("l1/l2"), 2)
        .unwrap();

    // The first visited entry matches; every later task sees the token and returns
    assert_eq!(result.matches.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.stats.entries_visited, 1);
}

#[test]
fn test_directories_only_never_returns_files() {
    let (_guard, top) = layered_tree();
    fs::create_dir(top.join("l1/l2/start/inner/found.mark")).unwrap();
    let config = mark_config().directories_only(true);

    let result = search(start_of(&top), &config, 2).unwrap();

    assert_eq!(result.matches, vec![top.join("l1/l2/start/inner/found.mark")]);
    assert_eq!(result.stats.listing_failures, 0);
}

#[test]
fn test_start_path_failures_are_reported() {
    let (_guard, top) = layered_tree();

    match search(top.join("missing"), &mark_config(), 0) {
        Err(SearchError::StartPath { path, .. }) => assert_eq!(path, top.join("missing")),
        other => panic!("unexpected result {other:?}"),
    }

    assert!(matches!(
        search(top.join("top.mark"), &mark_config(), 0),
        Err(SearchError::StartPathNotListable { .. })
    ));
}

#[test]
fn test_unlistable_level_is_skipped_and_walk_continues() {
    let temp_dir = TempDir::new().unwrap();
    let top = fs::canonicalize(temp_dir.path()).unwrap();
    fs::create_dir_all(top.join("mid/start")).unwrap();
    fs::write(top.join("mid/start/child.txt"), "").unwrap();
    fs::write(top.join("top.mark"), "").unwrap();

    // Moving `mid` away while level 0 runs leaves level 1 with nothing to list
    let moved = std::sync::Once::new();
    let (from, to) = (top.join("mid"), top.join("moved"));
    let config = SearchConfig::new(move |entry: &DirectoryEntry| {
        moved.call_once(|| fs::rename(&from, &to).unwrap());
        entry.name().ends_with(".mark")
    });
    let sequential = ParallelConfig { mode: ExecutionMode::Sequential, ..ParallelConfig::default() };

    let result = LevelCoordinator::new(&config)
        .with_parallel(sequential)
        .search(&top.join("mid/start"), 2)
        .unwrap();

    assert_eq!(result.stats.listing_failures, 1);
    assert_eq!(result.stats.levels_searched, 3);
    assert_eq!(result.matches, vec![top.join("top.mark")]);
}

#[cfg(unix)]
#[test]
fn test_unreadable_sibling_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let (_guard, top) = layered_tree();
    let locked = top.join("l1/l2/sibling3");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    let readable_anyway = fs::read_dir(&locked).is_ok();

    let result = search(start_of(&top), &mark_config(), 1);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    if readable_anyway {
        // Permission bits do not apply to root
        return;
    }

    let result = result.unwrap();
    assert_eq!(result.matches.len(), 1 + 1 + 15);
    assert!(!names(&result).contains("s3.mark"));
    assert_eq!(result.stats.listing_failures, 1);
}

/// a/start plus a/linked -> elsewhere, with elsewhere/inside.txt
#[cfg(unix)]
fn linked_sibling_tree() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let root = fs::canonicalize(temp_dir.path()).unwrap();
    fs::create_dir_all(root.join("a/start")).unwrap();
    fs::create_dir(root.join("elsewhere")).unwrap();
    fs::write(root.join("elsewhere/inside.txt"), "").unwrap();
    std::os::unix::fs::symlink(root.join("elsewhere"), root.join("a/linked")).unwrap();
    (temp_dir, root)
}

#[cfg(unix)]
#[test]
fn test_symlinked_directories_are_searched_by_default() {
    let (_guard, root) = linked_sibling_tree();

    let by_name = SearchConfig::new(|entry: &DirectoryEntry| entry.name() == "linked")
        .directories_only(true);
    let result = search(root.join("a/start"), &by_name, 1).unwrap();
    assert_eq!(result.matches, vec![root.join("a/linked")]);

    let by_ext = NamePredicate::new(PatternKind::Ext, &["txt".to_string()], false).unwrap();
    let result = search(root.join("a/start"), &SearchConfig::new(by_ext), 1).unwrap();
    assert_eq!(result.matches, vec![root.join("a/linked/inside.txt")]);
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_leaves_when_following_is_disabled() {
    let (_guard, root) = linked_sibling_tree();

    let by_name = SearchConfig::new(|entry: &DirectoryEntry| entry.name() == "linked")
        .directories_only(true)
        .follow_symlinks(false);
    assert!(search(root.join("a/start"), &by_name, 1).unwrap().is_empty());

    let by_ext = NamePredicate::new(PatternKind::Ext, &["txt".to_string()], false).unwrap();
    let config = SearchConfig::new(by_ext).follow_symlinks(false);
    assert!(search(root.join("a/start"), &config, 1).unwrap().is_empty());
}

#[cfg(unix)]
#[test]
fn test_symlinked_start_excludes_resolved_directory() {
    let (_guard, top) = layered_tree();
    let link = top.join("start-link");
    std::os::unix::fs::symlink(start_of(&top), &link).unwrap();

    let result = search(&link, &mark_config(), 1).unwrap();

    // The link resolves to l1/l2/start, so start.mark is found exactly once
    let start_hits = result
        .matches
        .iter()
        .filter(|path| path.ends_with("start.mark"))
        .count();
    assert_eq!(start_hits, 1);
    assert_eq!(result.matches.len(), 18);
}
