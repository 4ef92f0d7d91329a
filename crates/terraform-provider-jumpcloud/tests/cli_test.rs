//! Integration tests for the `terraform-provider-jumpcloud` binary.
//!
//! Offline commands run without credentials; commands that reach the API
//! run against a wiremock server named by `JUMPCLOUD_API_BASE_URL`.
#![allow(clippy::unwrap_used)]

use std::io::Write as _;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value as Json, json};
use tempfile::NamedTempFile;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UNKNOWN: &str = "74D93920-ED26-11E3-AC10-0800200C9A66";

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the provider binary with env isolation.
fn provider_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("terraform-provider-jumpcloud");
    cmd.env_remove("JUMPCLOUD_API_KEY")
        .env_remove("JUMPCLOUD_API_BASE_URL")
        .env_remove("JUMPCLOUD_TIMEOUT")
        .env_remove("TF_LOG_PROVIDER_JUMPCLOUD");
    cmd
}

fn document(value: &Json) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{value}").unwrap();
    file
}

fn stdout_json(output: &std::process::Output) -> Json {
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = provider_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "Expected 'Usage' in output:\n{stderr}");
}

#[test]
fn test_help_lists_commands() {
    provider_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("schema")
            .and(predicate::str::contains("plan"))
            .and(predicate::str::contains("apply"))
            .and(predicate::str::contains("import")),
    );
}

#[test]
fn test_schema_lists_resources() {
    let output = provider_cmd().arg("schema").output().unwrap();
    assert!(output.status.success());
    let schema = stdout_json(&output);
    assert_eq!(schema["provider"]["attributes"]["api_key"]["sensitive"], json!(true));
    let resources = schema["resource_schemas"].as_object().unwrap();
    let mut names: Vec<&str> = resources.keys().map(String::as_str).collect();
    names.sort_unstable();
    assert_eq!(
        names,
        ["jumpcloud_ad", "jumpcloud_devicegroup", "jumpcloud_usergroup"]
    );
}

// ── Validate and plan ───────────────────────────────────────────────

#[test]
fn test_validate_accepts_minimal_user_group() {
    let config = document(&json!({ "name": "engineering" }));
    provider_cmd()
        .args(["validate", "jumpcloud_usergroup", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"diagnostics\": []"));
}

#[test]
fn test_validate_rejects_unknown_operator() {
    let config = document(&json!({
        "name": "engineering",
        "member_queries": [{ "field": "department", "operator": "like", "value": "Eng" }]
    }));
    let output = provider_cmd()
        .args(["validate", "jumpcloud_usergroup", "--config"])
        .arg(config.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    let response = stdout_json(&output);
    assert_eq!(
        response["diagnostics"][0]["attribute"],
        json!("member_queries[0].operator")
    );
}

#[test]
fn test_validate_reads_stdin() {
    provider_cmd()
        .args(["validate", "jumpcloud_ad"])
        .write_stdin(r#"{"domain": "DC=test,DC=com"}"#)
        .assert()
        .success();
}

#[test]
fn test_invalid_json_is_a_usage_error() {
    provider_cmd()
        .args(["validate", "jumpcloud_ad"])
        .write_stdin("{ not json")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn test_plan_create_marks_computed_unknown() {
    let config = document(&json!({ "name": "engineering" }));
    let output = provider_cmd()
        .args(["plan", "jumpcloud_usergroup", "--compact", "--config"])
        .arg(config.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout.iter().filter(|b| **b == b'\n').count(), 1);

    let planned = &stdout_json(&output)["planned_state"];
    assert_eq!(planned["id"], json!(UNKNOWN));
    assert_eq!(planned["name"], json!("engineering"));
    assert_eq!(planned["description"], json!(""));
    assert_eq!(planned["email"], json!(""));
}

#[test]
fn test_plan_unknown_resource_type() {
    let config = document(&json!({}));
    provider_cmd()
        .args(["plan", "jumpcloud_user", "--config"])
        .arg(config.path())
        .assert()
        .code(4)
        .stdout(predicate::str::contains("Unknown resource type"));
}

// ── Configure ───────────────────────────────────────────────────────

#[test]
fn test_import_without_api_key_fails_configure() {
    provider_cmd()
        .args(["import", "jumpcloud_devicegroup", "dg-1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Missing JumpCloud API Key"));
}

#[test]
fn test_import_with_provider_config() {
    let provider_config = document(&json!({ "api_key": "from-config" }));
    let output = provider_cmd()
        .args(["import", "jumpcloud_devicegroup", "dg-1", "--provider-config"])
        .arg(provider_config.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let imported = &stdout_json(&output)["imported_state"];
    assert_eq!(imported["id"], json!("dg-1"));
    assert_eq!(imported["name"], json!(UNKNOWN));
}

// ── Against the API ─────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_read_refreshes_device_group() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/systemgroups/dg-1"))
        .and(header("x-api-key", "env-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "dg-1",
            "name": "renamed-outside-terraform",
            "type": "system_group"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = provider_cmd()
        .env("JUMPCLOUD_API_KEY", "env-key")
        .env("JUMPCLOUD_API_BASE_URL", format!("{}/api", server.uri()))
        .args(["read", "jumpcloud_devicegroup"])
        .write_stdin(r#"{"id": "dg-1", "name": "devices"}"#)
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let state = &stdout_json(&output)["new_state"];
    assert_eq!(state["name"], json!("renamed-outside-terraform"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_apply_failure_keeps_prior_state() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/systemgroups/dg-1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let prior = document(&json!({ "id": "dg-1", "name": "devices" }));
    let output = provider_cmd()
        .env("JUMPCLOUD_API_KEY", "env-key")
        .env("JUMPCLOUD_API_BASE_URL", format!("{}/api", server.uri()))
        .args(["apply", "jumpcloud_devicegroup", "--prior"])
        .arg(prior.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(4));
    let response = stdout_json(&output);
    assert_eq!(response["new_state"]["id"], json!("dg-1"));
    assert_eq!(response["diagnostics"][0]["severity"], json!("error"));
}
