//! Integration tests for the command-line interface.
//!
//! Only behavior that needs no cluster is exercised here.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn catalog_file(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("checks.yaml");
    fs::write(&path, content).unwrap();
    (temp, path)
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("spin-preflight"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("check").and(predicate::str::contains("list")));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("spin-preflight"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_check_help_mentions_show_fixes() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("spin-preflight"));
    cmd.args(["check", "--help"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--show-fixes"))
        .stdout(predicate::str::contains("SHOW_FIXES"));
    Ok(())
}

#[test]
fn cli_list_shows_builtin_checks() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("spin-preflight"));
    cmd.arg("list");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("spinapps.core.spinkube.dev"))
        .stdout(predicate::str::contains("binary-installed-on-nodes"));
    Ok(())
}

#[test]
fn cli_list_json_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, path) =
        catalog_file("- {name: widgets, checkType: crd, resourceName: widgets.example.io}\n");
    let mut cmd = Command::new(cargo_bin("spin-preflight"));
    cmd.arg("list").arg("--json").arg("--checks").arg(&path);
    let output = cmd.assert().success().get_output().stdout.clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(parsed[0]["resourceName"], "widgets.example.io");
    Ok(())
}

#[test]
fn cli_missing_catalog_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("spin-preflight"));
    cmd.args(["list", "--checks", "/nonexistent/checks.yaml"]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Check catalog not found"));
    Ok(())
}

#[test]
fn cli_malformed_catalog_fails() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, path) = catalog_file("name: [unclosed");
    let mut cmd = Command::new(cargo_bin("spin-preflight"));
    cmd.arg("check").arg("--checks").arg(&path);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse check catalog"));
    Ok(())
}

#[test]
fn cli_unknown_kind_fails_before_connecting() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, path) = catalog_file("- {name: weird, checkType: frobnicate, resourceName: x}\n");
    let mut cmd = Command::new(cargo_bin("spin-preflight"));
    cmd.arg("check").arg("--checks").arg(&path);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("frobnicate"));
    Ok(())
}

#[test]
fn cli_unknown_provider_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("spin-preflight"));
    cmd.args(["check", "kind"]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown provider: kind"));
    Ok(())
}

#[test]
fn cli_bare_provider_is_shorthand_for_check() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("spin-preflight"));
    cmd.arg("kind");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown provider: kind"));
    Ok(())
}

#[test]
fn cli_generates_completions()-> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("spin-preflight"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("spin-preflight"));
    Ok(())
}
