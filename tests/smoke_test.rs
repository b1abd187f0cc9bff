//! Smoke tests for the pgadm CLI.
//!
//! These tests verify basic CLI functionality:
//! - `pgadm --version` outputs version info
//! - `pgadm --help` outputs help text
//! - `pgadm` (no args) prints usage
//! - `pgadm version` reports build information in both modes

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a Command for the pgadm binary.
fn pgadm() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pgadm"))
}

#[test]
fn test_version_flag() {
    pgadm()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pgadm"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    pgadm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn test_help_lists_command_groups() {
    pgadm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pg"))
        .stdout(predicate::str::contains("patroni"))
        .stdout(predicate::str::contains("backup"))
        .stdout(predicate::str::contains("sty"));
}

#[test]
fn test_no_args_prints_usage() {
    pgadm()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_command_text() {
    pgadm()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pgadm"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_command_json() {
    let output = pgadm()
        .args(["-o", "json", "version"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["code"], 0);
    assert_eq!(value["data"]["version"], env!("CARGO_PKG_VERSION"));
    assert!(value["data"]["commit"].is_string());
}

#[test]
fn test_status_text_mode() {
    pgadm()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("pg_data:"))
        .stdout(predicate::str::contains("tools:"));
}

#[test]
fn test_status_json_mode() {
    let output = pgadm()
        .args(["-o", "json", "status"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["message"], "pgadm environment status");
    assert!(value["data"]["tools"].is_array());
}

#[test]
fn test_unknown_subcommand_fails() {
    pgadm()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_invalid_output_format_rejected() {
    pgadm()
        .args(["-o", "xml", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
