//! Integration tests for command schema introspection.

use assert_cmd::Command;
use predicates::prelude::*;

fn pgadm() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pgadm"))
}

#[test]
fn schema_list_text_prints_table() {
    pgadm()
        .args(["schema", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("COMMAND"))
        .stdout(predicate::str::contains("RISK"))
        .stdout(predicate::str::contains("pgadm backup restore"))
        .stdout(predicate::str::contains("pgadm patroni switchover"));
}

#[test]
fn schema_list_json_carries_registry() {
    let output = pgadm()
        .args(["-o", "json", "schema", "list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["success"], true);
    let schemas = value["data"].as_array().unwrap();
    assert!(!schemas.is_empty());
    assert!(schemas
        .iter()
        .any(|s| s["name"] == "pgadm backup restore"));
}

#[test]
fn schema_show_known_command() {
    let output = pgadm()
        .args(["-o", "json", "schema", "show", "pgadm backup restore"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["data"]["name"], "pgadm backup restore");
    // A destructive restore must demand confirmation.
    assert_ne!(value["data"]["confirm"], "none");
}

#[test]
fn schema_show_text_mode() {
    pgadm()
        .args(["schema", "show", "pgadm pg start"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name"))
        .stdout(predicate::str::contains("pgadm pg start"));
}

#[test]
fn schema_show_unknown_command_fails() {
    let assert = pgadm()
        .args(["-o", "json", "schema", "show", "pgadm no such"])
        .assert()
        .failure()
        .code(2);
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value["success"], false);
    // SYSTEM module base + PARAM category + local 1.
    assert_eq!(value["code"], 990101);
    assert_eq!(value["message"], "unknown command");
}
