//! Integration tests that drive the `ideate` binary for offline commands.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

use crate::integration::test_utils::{write_file, CONTACT_CENTER_SCHEMA};

/// Run the binary with an isolated config home so host files cannot leak in.
fn run(workspace: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ideate"))
        .env("XDG_CONFIG_HOME", workspace.join("xdg"))
        .env("IDEATE_LOG", "off")
        .env_remove("IDEATE_ENV")
        .arg("--workspace")
        .arg(workspace)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_classify_json_output() {
    let temp = TempDir::new().unwrap();
    let schema = write_file(temp.path(), "schema.json", CONTACT_CENTER_SCHEMA);

    let output = run(
        temp.path(),
        &["classify", "--schema", schema.to_str().unwrap(), "--format", "json"],
    );
    assert!(
        output.status.success(),
        "classify should succeed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["ENTITY_TYPES"]["Fact"][0], "calls");
    assert_eq!(value["ATTRIBUTE_TYPES"]["Ordered"][0], "priority");
}

#[test]
fn test_classify_text_output_lists_categories() {
    let temp = TempDir::new().unwrap();
    let schema = write_file(temp.path(), "schema.json", CONTACT_CENTER_SCHEMA);

    let output = run(temp.path(), &["classify", "--schema", schema.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Continuous"));
    assert!(stdout.contains("acv, aht"));
}

#[test]
fn test_context_command_prints_passages() {
    let temp = TempDir::new().unwrap();
    let schema = write_file(temp.path(), "schema.json", CONTACT_CENTER_SCHEMA);

    let output = run(
        temp.path(),
        &["context", "--schema", schema.to_str().unwrap(), "--extraction", "--format", "json"],
    );
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["passages"].as_array().unwrap().len(), 3);
    assert_eq!(value["fingerprint"].as_str().unwrap().len(), 64);
}

#[test]
fn test_workspace_config_is_honored() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("config")).unwrap();
    std::fs::write(
        temp.path().join("config").join("config.toml"),
        "[generation]\nmax_prompts = 3\npipeline_mode = \"delegated\"\n",
    )
    .unwrap();

    let output = run(temp.path(), &["show-config", "--format", "json"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["generation"]["max_prompts"], 3);
    assert_eq!(value["generation"]["pipeline_mode"], "delegated");
}

#[test]
fn test_missing_schema_exits_non_zero() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["classify", "--schema", "does-not-exist.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read document"));
}
