//! CLI integration tests for the ava-init binary
//!
//! Installation is skipped through the environment so these run offline.

use assert_cmd::Command;
use ava_init::options::SKIP_INSTALL_ENV;
use ava_init::test_utils::fixtures::{read_test_script, temp_project};
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a test command
fn test_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ava-init").unwrap();
    cmd.current_dir(dir.path()).env(SKIP_INSTALL_ENV, "1");
    cmd
}

#[test]
fn test_help_command() {
    let temp_dir = TempDir::new().unwrap();
    test_cmd(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Add AVA to your project"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_command() {
    let temp_dir = TempDir::new().unwrap();
    test_cmd(&temp_dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_invokes_via_cli() {
    let (temp_dir, path) = temp_project("{}");

    test_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped installation"));

    assert_eq!(read_test_script(&path).as_deref(), Some("ava"));
}

#[test]
fn test_interprets_cli_arguments() {
    let (temp_dir, path) = temp_project("{}");

    test_cmd(&temp_dir)
        .args(["--foo", "--bar"])
        .assert()
        .success();

    assert_eq!(read_test_script(&path).as_deref(), Some("ava --foo --bar"));
}

#[test]
fn test_cli_drops_control_flags() {
    let (temp_dir, path) = temp_project(r#"{"scripts": {"test": "xo"}}"#);

    test_cmd(&temp_dir)
        .args(["--init", "--verbose", "--unicorn"])
        .assert()
        .success()
        .stdout(predicate::str::contains("xo && ava --verbose"));

    assert_eq!(
        read_test_script(&path).as_deref(),
        Some("xo && ava --verbose")
    );
}

#[test]
fn test_cli_forwards_positional_globs() {
    let (temp_dir, path) = temp_project("{}");

    test_cmd(&temp_dir)
        .args(["test/**/*.spec.js", "--serial"])
        .assert()
        .success();

    assert_eq!(
        read_test_script(&path).as_deref(),
        Some("ava test/**/*.spec.js --serial")
    );
}

#[test]
fn test_cli_invalid_manifest_fails() {
    let (temp_dir, _path) = temp_project("not json");

    test_cmd(&temp_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse package.json"));
}
