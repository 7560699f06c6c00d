//! Tests for the turbo-inspect CLI
//!
//! This module contains integration tests for CLI commands.
//! Use `cargo test --package turbo-inspect --test test` to run these tests.
//!
//! Help screens are snapshot tested. When commands change, update snapshots with:
//! `cargo insta review` or `INSTA_UPDATE=always cargo test --package turbo-inspect`

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use insta::assert_snapshot;
use tempfile::TempDir;

const MANIFEST: &str = r#"{
    "name": "acme",
    "version": "0.1.0",
    "private": true,
    "workspaces": { "packages": ["apps/*", "packages/*"] },
    "turbo": {
        "pipeline": {
            "build": { "dependsOn": ["^build"], "outputs": ["dist/**"] },
            "lint": { "outputs": [] },
            "dev": { "cache": false }
        }
    }
}"#;

/// Run the CLI with the given arguments.
fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_turbo-inspect"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Help output with the binary name normalized across platforms.
fn help(args: &[&str]) -> String {
    let output = run_cli(args);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    stdout(&output).replace("turbo-inspect.exe", "turbo-inspect")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn write_manifest(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("package.json");
    fs::write(&path, contents).expect("Failed to write manifest");
    path
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp paths are utf-8")
}

// =============================================================================
// Help Tests
// =============================================================================

#[test]
fn test_cli_main_help_snapshot() {
    assert_snapshot!(help(&["--help"]));
}

#[test]
fn test_cli_workspaces_help_snapshot() {
    assert_snapshot!(help(&["workspaces", "--help"]));
}

#[test]
fn test_cli_version() {
    let output = run_cli(&["--version"]);
    assert!(stdout(&output).contains("turbo-inspect"));
}

// =============================================================================
// Command Tests
// =============================================================================

#[test]
fn test_inspect_table() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_manifest(temp_dir.path(), MANIFEST);

    let output = run_cli(&["inspect", path_arg(&path)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let table = stdout(&output);
    assert!(table.contains("acme"));
    assert!(table.contains("apps/*, packages/*"));
}

#[test]
fn test_inspect_json_keeps_empty_outputs() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_manifest(temp_dir.path(), MANIFEST);

    let output = run_cli(&["inspect", "--json", path_arg(&path)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("output is valid JSON");
    assert_eq!(json["name"], "acme");
    assert_eq!(json["workspaces"], serde_json::json!(["apps/*", "packages/*"]));
    assert_eq!(
        json["turbo"]["pipeline"]["lint"]["outputs"],
        serde_json::json!([])
    );
    assert!(json["turbo"]["pipeline"]["dev"].get("outputs").is_none());
}

#[test]
fn test_pipeline_table() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_manifest(temp_dir.path(), MANIFEST);

    let output = run_cli(&["pipeline", path_arg(&path)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let table = stdout(&output);
    assert!(table.contains("build"));
    assert!(table.contains("^build"));
    assert!(table.contains("(none)"));
    assert!(table.contains("(default)"));
    assert!(table.contains("false"));
}

#[test]
fn test_pipeline_missing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_manifest(temp_dir.path(), r#"{ "name": "leaf" }"#);

    let output = run_cli(&["pipeline", path_arg(&path)]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No pipeline configured"));
}

#[test]
fn test_workspaces_lists_globs() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_manifest(temp_dir.path(), MANIFEST);

    let output = run_cli(&["workspaces", path_arg(&path)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "apps/*\npackages/*\n");
}

#[test]
fn test_shape_error_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_manifest(temp_dir.path(), r#"{ "workspaces": 5 }"#);

    let output = run_cli(&["workspaces", path_arg(&path)]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("workspaces"));
}

#[test]
fn test_missing_file_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("package.json");

    let output = run_cli(&["inspect", path_arg(&path)]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to read manifest"));
}
