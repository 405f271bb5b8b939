#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("marquee");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("discover"))
        .stdout(predicate::str::contains("tui"));
}

#[test]
fn test_search_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("marquee");
    cmd.args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--query"));
}

#[test]
fn test_search_missing_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("marquee");
    cmd.arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_discover_rejects_unknown_sort() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("marquee");
    cmd.args(["discover", "--sort", "alphabetical"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rating-desc"));
}

#[test]
fn test_search_without_token_reports_missing_key() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("marquee");
    cmd.env_remove("TMDB_API_TOKEN")
        .arg("--dir")
        .arg(dir.path())
        .args(["search", "--query", "batman"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key is missing"));
}

#[test]
fn test_invalid_config_is_reported() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[catalog\n").unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("marquee");
    cmd.arg("--dir")
        .arg(dir.path())
        .arg("genres")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn test_completions_bash() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("marquee");
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marquee"));
}
