//! CLI surface tests using assert_cmd

use assert_cmd::Command;
use predicates::prelude::*;

fn slugsweep() -> Command {
    Command::cargo_bin("slugsweep").expect("binary builds")
}

#[test]
fn test_help_lists_subcommands() {
    slugsweep()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sweep"))
        .stdout(predicate::str::contains("evict"));
}

#[test]
fn test_version_flag() {
    slugsweep()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("slugsweep"));
}

#[test]
fn test_no_subcommand_is_an_error() {
    slugsweep().assert().failure();
}

#[test]
fn test_sweep_help_documents_phase() {
    slugsweep()
        .args(["sweep", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--phase"))
        .stdout(predicate::str::contains("--ignore-file"));
}

#[test]
fn test_evict_requires_directory() {
    slugsweep().arg("evict").assert().failure();
}

#[test]
fn test_unknown_color_mode_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    slugsweep()
        .current_dir(dir.path())
        .args(["sweep", "--color", "sometimes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sometimes"));
}
