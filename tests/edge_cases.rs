//! Edge case tests for slugsweep


use harness::{run_slugsweep, TestProject};

#[test]
fn test_blank_only_ignore_file_reports_zero() {
    let project = TestProject::new();
    project.add_file(".lateslugignore", "\n   \n\t\n\n");
    project.add_file("keep.txt", "keep");

    let (stdout, _stderr, success) = run_slugsweep(project.path(), &["sweep"]);
    assert!(success);
    assert!(
        stdout.contains("0 files matching 0 patterns"),
        "whitespace-only file parses to zero patterns: {}",
        stdout
    );
    assert!(project.path().join("keep.txt").exists());
}

#[test]
fn test_hash_prefixed_line_is_a_pattern_not_a_comment() {
    // There is no comment syntax; a '#' line is a literal glob pattern that
    // matches nothing in a normal tree.
    let project = TestProject::new();
    project.add_file(".lateslugignore", "# *.log\nkeep.txt\n");
    project.add_file("a.log", "log");
    project.add_file("keep.txt", "keep");

    let (stdout, _stderr, success) = run_slugsweep(project.path(), &["sweep"]);
    assert!(success);
    assert!(
        stdout.contains("2 patterns"),
        "the '#' line counts as a pattern: {}",
        stdout
    );
    assert!(
        project.path().join("a.log").exists(),
        "'# *.log' is not a comment for '*.log'"
    );
    assert!(!project.path().join("keep.txt").exists());
}

#[test]
fn test_matched_directory_is_reported_but_kept() {
    let project = TestProject::new();
    project.add_file(".lateslugignore", "assets\n");
    project.add_dir("assets");
    project.add_file("assets/app.css", "body {}");

    let (stdout, _stderr, success) = run_slugsweep(project.path(), &["sweep"]);
    assert!(success);
    assert!(
        stdout.contains("Skipped 1 matched directories"),
        "should warn about the skipped directory: {}",
        stdout
    );
    assert!(project.path().join("assets").is_dir());
    assert!(
        project.path().join("assets/app.css").exists(),
        "directory contents are not swept by a directory match"
    );
}

#[test]
fn test_overlapping_patterns_delete_once() {
    let project = TestProject::new();
    project.add_file(".lateslugignore", "*.log\na.*\na.lo?\n");
    project.add_file("a.log", "log");

    let (stdout, _stderr, success) = run_slugsweep(project.path(), &["sweep"]);
    assert!(success, "duplicate candidates must not fail: {}", stdout);
    assert!(!project.path().join("a.log").exists());
    assert!(
        stdout.contains("Deleted 1 files"),
        "deleted exactly once: {}",
        stdout
    );
}

#[test]
fn test_deeply_nested_match() {
    let project = TestProject::new();
    project.add_file(".lateslugignore", "*.map\n");
    project.add_file("public/assets/js/vendor/app.js.map", "{}");
    project.add_file("public/assets/js/vendor/app.js", "code");

    let (_stdout, _stderr, success) = run_slugsweep(project.path(), &["sweep"]);
    assert!(success);
    assert!(!project
        .path()
        .join("public/assets/js/vendor/app.js.map")
        .exists());
    assert!(project.path().join("public/assets/js/vendor/app.js").exists());
}

#[test]
fn test_empty_tree_sweep() {
    let project = TestProject::new();
    project.add_file(".lateslugignore", "*.log\n");

    let (stdout, _stderr, success) = run_slugsweep(project.path(), &["sweep"]);
    assert!(success);
    assert!(stdout.contains("0 files matching 1 patterns"), "{}", stdout);
}

#[test]
fn test_hidden_files_survive_a_wildcard_sweep() {
    let project = TestProject::new();
    project.add_file(".lateslugignore", "*.log\n");
    project.add_file("a.log", "log");
    project.add_file(".secret.log", "hidden");
    project.add_file(".git/objects/pack.log", "inside hidden dir");

    let (_stdout, _stderr, success) = run_slugsweep(project.path(), &["sweep"]);
    assert!(success);
    assert!(!project.path().join("a.log").exists());
    assert!(
        project.path().join(".secret.log").exists(),
        "'*.log' must not match a leading dot"
    );
    assert!(project.path().join(".git/objects/pack.log").exists());
}

#[test]
fn test_unicode_filenames() {
    let project = TestProject::new();
    project.add_file(".lateslugignore", "*.log\n");
    project.add_file("журнал.log", "log");
    project.add_file("日誌.txt", "keep");

    let (_stdout, _stderr, success) = run_slugsweep(project.path(), &["sweep"]);
    assert!(success);
    assert!(!project.path().join("журнал.log").exists());
    assert!(project.path().join("日誌.txt").exists());
}

#[test]
fn test_evict_empty_cache_dir() {
    let project = TestProject::new();
    project.add_dir("cache");

    let cache = project.path().join("cache");
    let (_stdout, _stderr, success) = run_slugsweep(
        project.path(),
        &["evict", cache.to_str().unwrap(), "--limit", "0"],
    );
    assert!(success);
    assert!(cache.is_dir());
}

#[test]
fn test_evict_zero_limit_keeps_directory_structure() {
    let project = TestProject::new();
    project.add_file("cache/sprockets/v3/a.cache", "data");
    project.add_file("cache/sprockets/v3/b.cache", "data");

    let cache = project.path().join("cache");
    let (_stdout, _stderr, success) = run_slugsweep(
        project.path(),
        &["evict", cache.to_str().unwrap(), "--limit", "0"],
    );
    assert!(success);
    assert!(!cache.join("sprockets/v3/a.cache").exists());
    assert!(!cache.join("sprockets/v3/b.cache").exists());
    assert!(
        cache.join("sprockets/v3").is_dir(),
        "eviction is file-granular"
    );
}
