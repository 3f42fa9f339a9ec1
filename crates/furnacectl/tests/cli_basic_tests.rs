use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a test command
fn furnacectl() -> Command {
    Command::cargo_bin("furnacectl").unwrap()
}

#[test]
fn test_help_flag() {
    furnacectl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stack lifecycle CLI"))
        .stdout(predicate::str::contains("EXAMPLES:"));
}

#[test]
fn test_help_short_flag() {
    furnacectl()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    furnacectl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("furnacectl"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_args_shows_help() {
    furnacectl()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    furnacectl()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_push_help_documents_fallback() {
    furnacectl()
        .args(["push", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("defaults to the configured stack_name"));
}

#[test]
fn test_delete_help_shows_examples() {
    furnacectl()
        .args(["delete", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("furnacectl delete MyStack"));
}

#[test]
fn test_delete_rejects_extra_positionals() {
    furnacectl()
        .args(["delete", "one", "two"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}

#[test]
fn test_corrupt_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "[[[broken").unwrap();

    furnacectl()
        .args(["status", "--config-file"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
