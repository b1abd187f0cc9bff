//! Integration tests for the structured output contract.
//!
//! These tests exercise the paths that never touch an external tool:
//! parameter validation failures and guarded destructive commands. They
//! verify that structured mode emits a parsable envelope with the
//! published stable code, and that the shell exit status follows the
//! category band (parameter errors exit 2).

use assert_cmd::Command;
use predicates::prelude::*;

fn pgadm() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pgadm"))
}

fn parse_stdout(output: &assert_cmd::assert::Assert) -> serde_json::Value {
    serde_json::from_slice(&output.get_output().stdout).unwrap()
}

#[test]
fn restore_without_target_fails_as_param_error_json() {
    let assert = pgadm()
        .args(["-o", "json", "backup", "restore"])
        .assert()
        .failure()
        .code(2);
    let value = parse_stdout(&assert);
    assert_eq!(value["success"], false);
    assert_eq!(value["code"], 140102);
    assert_eq!(value["message"], "invalid restore parameters");
    assert!(value["detail"]
        .as_str()
        .unwrap()
        .contains("no recovery target"));
    // Nothing ran, so there must be no captured output.
    assert!(value["data"].get("captured_output").is_none());
    assert_eq!(value["data"]["command"], "pgadm backup restore");
    // Recorded params keep the boolean flags but drop null-valued ones.
    assert_eq!(value["data"]["params"]["latest"], false);
    assert!(value["data"]["params"].get("time").is_none());
}

#[test]
fn restore_without_target_fails_plainly_in_text_mode() {
    pgadm()
        .args(["backup", "restore"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no recovery target"));
}

#[test]
fn restore_with_conflicting_targets_is_rejected() {
    let assert = pgadm()
        .args(["-o", "json", "backup", "restore", "--latest", "--immediate"])
        .assert()
        .failure()
        .code(2);
    let value = parse_stdout(&assert);
    assert_eq!(value["code"], 140102);
    assert!(value["detail"]
        .as_str()
        .unwrap()
        .contains("multiple recovery targets"));
}

#[test]
fn restore_with_bad_time_is_rejected() {
    let assert = pgadm()
        .args(["-o", "json", "backup", "restore", "-t", "yesterday"])
        .assert()
        .failure()
        .code(2);
    let value = parse_stdout(&assert);
    assert_eq!(value["code"], 140102);
    assert!(value["detail"]
        .as_str()
        .unwrap()
        .contains("unrecognized recovery time"));
}

#[test]
fn invalid_backup_type_is_a_param_error() {
    let assert = pgadm()
        .args(["-o", "json", "backup", "backup", "differential"])
        .assert()
        .failure()
        .code(2);
    let value = parse_stdout(&assert);
    assert_eq!(value["success"], false);
    assert_eq!(value["code"], 140101);
    assert!(value["detail"]
        .as_str()
        .unwrap()
        .contains("expected full, diff or incr"));
}

#[test]
fn stanza_delete_requires_force_json() {
    let assert = pgadm()
        .args(["-o", "json", "backup", "stanza", "delete"])
        .assert()
        .failure()
        .code(2);
    let value = parse_stdout(&assert);
    assert_eq!(value["code"], 140103);
    assert!(value["detail"].as_str().unwrap().contains("--force"));
}

#[test]
fn stanza_delete_requires_force_text() {
    pgadm()
        .args(["backup", "stanza", "delete"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn switchover_without_force_is_refused_in_json_mode() {
    let assert = pgadm()
        .args(["-o", "json", "patroni", "switchover"])
        .assert()
        .failure()
        .code(2);
    let value = parse_stdout(&assert);
    assert_eq!(value["code"], 150101);
    assert!(value["detail"].as_str().unwrap().contains("--force"));
}

#[test]
fn failover_without_force_is_refused_in_json_mode() {
    let assert = pgadm()
        .args(["-o", "json", "patroni", "failover"])
        .assert()
        .failure()
        .code(2);
    let value = parse_stdout(&assert);
    assert_eq!(value["code"], 150102);
}

#[test]
fn yaml_envelope_is_parsable() {
    let assert = pgadm()
        .args(["-o", "yaml", "backup", "restore"])
        .assert()
        .failure()
        .code(2);
    let output = assert.get_output().stdout.clone();
    let value: serde_yaml::Value = serde_yaml::from_slice(&output).unwrap();
    assert_eq!(value["success"], serde_yaml::Value::Bool(false));
    assert_eq!(
        value["code"],
        serde_yaml::Value::Number(serde_yaml::Number::from(140102))
    );
}

#[test]
fn json_pretty_is_multiline_json() {
    let assert = pgadm()
        .args(["-o", "json-pretty", "backup", "restore"])
        .assert()
        .failure();
    let output = assert.get_output().stdout.clone();
    let text = String::from_utf8(output).unwrap();
    assert!(text.lines().count() > 1);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["code"], 140102);
}

#[test]
fn output_format_env_var_is_honored() {
    let assert = pgadm()
        .env("PGADM_OUTPUT", "json")
        .args(["backup", "restore"])
        .assert()
        .failure()
        .code(2);
    let value = parse_stdout(&assert);
    assert_eq!(value["code"], 140102);
}

#[test]
fn operation_failure_wraps_captured_output() {
    // `ext list` shells out to psql; in the test environment either the
    // binary is missing or the server is unreachable, so the bridge must
    // fold the failure into an OPERATION-band envelope with exit 1.
    let assert = pgadm()
        .env("PATH", "/nonexistent")
        .args(["-o", "json", "ext", "list"])
        .assert()
        .failure()
        .code(1);
    let value = parse_stdout(&assert);
    assert_eq!(value["success"], false);
    assert_eq!(value["code"], 100801);
    assert_eq!(value["message"], "pgadm ext list failed");
}
