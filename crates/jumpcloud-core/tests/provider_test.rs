#![allow(clippy::unwrap_used)]
// End-to-end tests for the provider dispatch surface against a wiremock API.

use pretty_assertions::assert_eq;
use serde_json::{Value as Json, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jumpcloud_config::Settings;
use jumpcloud_core::{ConfiguredProvider, Provider, Severity};

const USER_GROUP: &str = "jumpcloud_usergroup";
const AD: &str = "jumpcloud_ad";
const DEVICE_GROUP: &str = "jumpcloud_devicegroup";

const OPERATORS: [&str; 9] = ["eq", "ne", "gt", "lt", "ge", "le", "between", "search", "in"];

// ── Helpers ─────────────────────────────────────────────────────────

fn settings(server: &MockServer, env_key: Option<&str>) -> Settings {
    Settings {
        api_key: env_key.map(str::to_owned),
        api_base_url: format!("{}/api", server.uri()),
        timeout: 5,
    }
}

async fn setup() -> (MockServer, ConfiguredProvider) {
    let server = MockServer::start().await;
    let provider = Provider::new("0.1.0")
        .configure_with_settings(&json!({ "api_key": "test-key" }), &settings(&server, None))
        .unwrap();
    (server, provider)
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

/// Plan from configuration and apply it, returning the new state.
async fn plan_and_apply(
    provider: &ConfiguredProvider,
    type_name: &str,
    config: &Json,
    prior: Option<&Json>,
) -> Json {
    let plan = provider.plan_resource_change(type_name, config, prior);
    assert!(plan.diagnostics.is_empty(), "{}", plan.diagnostics);
    let applied = provider
        .apply_resource_change(type_name, prior.cloned(), plan.planned_state)
        .await;
    assert!(!applied.diagnostics.has_errors(), "{}", applied.diagnostics);
    applied.new_state.unwrap()
}

// ── User group lifecycle ────────────────────────────────────────────

#[tokio::test]
async fn test_user_group_create_import_and_rename() {
    let (server, provider) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/usergroups"))
        .and(header("x-api-key", "test-key"))
        .and(body_json(json!({ "name": "terraform-test-usergroup-default" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "ug-123",
            "name": "terraform-test-usergroup-default",
            "type": "user_group"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/usergroups/ug-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ug-123",
            "name": "terraform-test-usergroup-default",
            "type": "user_group"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v2/usergroups/ug-123"))
        .and(body_json(json!({
            "id": "ug-123",
            "name": "terraform-test-usergroup-default-updated"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ug-123",
            "name": "terraform-test-usergroup-default-updated",
            "type": "user_group"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Create
    let config = json!({ "name": "terraform-test-usergroup-default" });
    let state = plan_and_apply(&provider, USER_GROUP, &config, None).await;
    assert_eq!(state["name"], json!("terraform-test-usergroup-default"));
    assert_eq!(state["id"], json!("ug-123"));
    assert_eq!(state["description"], json!(""));
    assert_eq!(state["notify"], json!(false));
    assert_eq!(state["ldap"], Json::Null);

    // Import + read reproduces the same state
    let imported = provider.import_resource_state(USER_GROUP, "ug-123").await;
    assert!(imported.diagnostics.is_empty());
    let read = provider
        .read_resource(USER_GROUP, imported.imported_state.unwrap())
        .await;
    assert!(read.diagnostics.is_empty(), "{}", read.diagnostics);
    assert_eq!(read.new_state.as_ref(), Some(&state));

    // Unchanged configuration plans the current state
    let plan = provider.plan_resource_change(USER_GROUP, &config, Some(&state));
    assert_eq!(plan.planned_state.as_ref(), Some(&state));

    // Rename in place
    let renamed = json!({ "name": "terraform-test-usergroup-default-updated" });
    let updated = plan_and_apply(&provider, USER_GROUP, &renamed, Some(&state)).await;
    assert_eq!(updated["id"], json!("ug-123"));
    assert_eq!(
        updated["name"],
        json!("terraform-test-usergroup-default-updated")
    );
}

#[tokio::test]
async fn test_user_group_nested_blocks_reach_the_api() {
    let (server, provider) = setup().await;

    let expected_body = json!({
        "name": "ops",
        "email": "ops@example.com",
        "attributes": {
            "sudo": { "enabled": true },
            "ldapGroups": [{ "name": "ops-ldap" }],
            "posixGroups": [{ "id": 5001, "name": "ops" }],
            "radius": { "reply": [{ "name": "Filter-Id", "value": "ops" }] },
            "sambaEnabled": true
        },
        "memberQuery": {
            "queryType": "FilterQuery",
            "filters": [{ "field": "department", "operator": "eq", "value": "Ops" }]
        },
        "membershipAutomated": true
    });
    let mut response = expected_body.clone();
    response["id"] = json!("ug-9");

    Mock::given(method("POST"))
        .and(path("/api/v2/usergroups"))
        .and(body_json(expected_body))
        .respond_with(ResponseTemplate::new(201).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let config = json!({
        "name": "ops",
        "email": "ops@example.com",
        "sudo": { "enabled": true, "passwordless": false },
        "ldap": { "groups": [{ "name": "ops-ldap" }] },
        "posix": [{ "id": 5001, "name": "ops" }],
        "radius": [{ "name": "Filter-Id", "value": "ops" }],
        "samba": { "enabled": true },
        "member_queries": [{ "field": "department", "operator": "eq", "value": "Ops" }],
        "auto": true
    });
    let state = plan_and_apply(&provider, USER_GROUP, &config, None).await;

    assert_eq!(state["id"], json!("ug-9"));
    assert_eq!(state["sudo"], json!({ "enabled": true, "passwordless": false }));
    assert_eq!(state["ldap"], json!({ "groups": [{ "name": "ops-ldap" }] }));
    assert_eq!(state["posix"], json!([{ "id": 5001, "name": "ops" }]));
    assert_eq!(state["samba"], json!({ "enabled": true }));
    assert_eq!(state["member_queries"][0]["operator"], json!("eq"));
    assert_eq!(state["auto"], json!(true));
    assert_eq!(state["notify"], json!(false));
}

// ── Validation happens before the network ───────────────────────────

#[tokio::test]
async fn test_invalid_operator_fails_before_any_request() {
    let (server, provider) = setup().await;

    let config = json!({
        "name": "ops",
        "member_queries": [{ "field": "department", "operator": "invalid", "value": "Ops" }]
    });

    let plan = provider.plan_resource_change(USER_GROUP, &config, None);
    assert_eq!(plan.planned_state, None);
    let diag = plan.diagnostics.iter().next().unwrap();
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(
        diag.attribute.as_ref().unwrap().to_string(),
        "member_queries[0].operator"
    );
    for op in OPERATORS {
        assert!(diag.detail.contains(&format!("\"{op}\"")), "{}", diag.detail);
    }

    // A hand-built plan with the same value is rejected at apply too.
    let mut planned = config.clone();
    planned["id"] = json!(jumpcloud_core::value::UNKNOWN_SENTINEL);
    let applied = provider
        .apply_resource_change(USER_GROUP, None, Some(planned))
        .await;
    assert!(applied.diagnostics.has_errors());
    assert_eq!(applied.new_state, None);

    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_every_operator_passes_validation() {
    let (server, provider) = setup().await;

    for op in OPERATORS {
        let config = json!({
            "name": "ops",
            "member_queries": [{ "field": "department", "operator": op, "value": "Ops" }]
        });
        let plan = provider.plan_resource_change(USER_GROUP, &config, None);
        assert!(plan.diagnostics.is_empty(), "{op}: {}", plan.diagnostics);
        assert!(plan.planned_state.is_some());
    }

    assert_eq!(request_count(&server).await, 0);
}

// ── Failure handling ────────────────────────────────────────────────

#[tokio::test]
async fn test_failed_delete_keeps_state() {
    let (server, provider) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/usergroups/ug-123"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let state = json!({ "id": "ug-123", "name": "ops" });
    let applied = provider
        .apply_resource_change(USER_GROUP, Some(state.clone()), None)
        .await;

    assert_eq!(applied.new_state, Some(state));
    let diag = applied.diagnostics.iter().next().unwrap();
    assert_eq!(diag.summary, "Error deleting User Group from JumpCloud");
    assert!(diag.detail.contains("status: 500"), "{}", diag.detail);
    assert!(diag.detail.contains("internal error"), "{}", diag.detail);
}

#[tokio::test]
async fn test_successful_delete_drops_state() {
    let (server, provider) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/systemgroups/sg1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let applied = provider
        .apply_resource_change(
            DEVICE_GROUP,
            Some(json!({ "id": "sg1", "name": "laptops" })),
            None,
        )
        .await;
    assert_eq!(applied.new_state, None);
    assert!(applied.diagnostics.is_empty());
}

#[tokio::test]
async fn test_failed_create_leaves_no_state() {
    let (server, provider) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/systemgroups"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"message":"bad name"}"#))
        .mount(&server)
        .await;

    let plan = provider.plan_resource_change(DEVICE_GROUP, &json!({ "name": "laptops" }), None);
    let applied = provider
        .apply_resource_change(DEVICE_GROUP, None, plan.planned_state)
        .await;
    assert_eq!(applied.new_state, None);
    assert_eq!(
        applied.diagnostics.iter().next().unwrap().summary,
        "Error creating Device Group"
    );
}

#[tokio::test]
async fn test_undecodable_response_is_an_error() {
    let (server, provider) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/usergroups"))
        .respond_with(ResponseTemplate::new(201).set_body_string("not json"))
        .mount(&server)
        .await;

    let plan = provider.plan_resource_change(USER_GROUP, &json!({ "name": "ops" }), None);
    let applied = provider
        .apply_resource_change(USER_GROUP, None, plan.planned_state)
        .await;
    assert_eq!(applied.new_state, None);
    assert!(applied.diagnostics.has_errors());
    assert!(
        applied.diagnostics.iter().next().unwrap().detail.contains("could not be decoded"),
        "{}",
        applied.diagnostics
    );
}

#[tokio::test]
async fn test_read_of_deleted_resource_drops_state() {
    let (server, provider) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/usergroups/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"Not Found"}"#))
        .mount(&server)
        .await;

    let read = provider
        .read_resource(USER_GROUP, json!({ "id": "gone", "name": "ops" }))
        .await;
    assert_eq!(read.new_state, None);
    assert!(!read.diagnostics.has_errors());
    assert_eq!(read.diagnostics.iter().next().unwrap().severity, Severity::Warning);
}

#[tokio::test]
async fn test_read_failure_keeps_prior_state() {
    let (server, provider) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/activedirectories/ad1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let prior = json!({ "id": "ad1", "domain": "DC=test,DC=com" });
    let read = provider.read_resource(AD, prior.clone()).await;
    assert_eq!(read.new_state, Some(prior));
    assert!(read.diagnostics.has_errors());
}

// ── Active Directory ────────────────────────────────────────────────

#[tokio::test]
async fn test_active_directory_update_always_fails() {
    let (server, provider) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/activedirectories"))
        .and(body_json(json!({ "domain": "DC=test,DC=com" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "ad1",
            "domain": "DC=test,DC=com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = plan_and_apply(&provider, AD, &json!({ "domain": "DC=test,DC=com" }), None).await;
    assert_eq!(state, json!({ "id": "ad1", "domain": "DC=test,DC=com" }));

    let plan = provider.plan_resource_change(AD, &json!({ "domain": "DC=updated,DC=com" }), Some(&state));
    let applied = provider
        .apply_resource_change(AD, Some(state.clone()), plan.planned_state)
        .await;

    assert_eq!(applied.new_state, Some(state));
    let diag = applied.diagnostics.iter().next().unwrap();
    assert_eq!(diag.summary, "Update is unsupported for Active Directories");
    assert_eq!(request_count(&server).await, 1);
}

// ── Device groups ───────────────────────────────────────────────────

#[tokio::test]
async fn test_device_group_create() {
    let (server, provider) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/systemgroups"))
        .and(header("x-api-key", "test-key"))
        .and(body_json(json!({ "name": "laptops" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "sg9",
            "name": "laptops",
            "type": "system_group"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = plan_and_apply(&provider, DEVICE_GROUP, &json!({ "name": "laptops" }), None).await;
    assert_eq!(state, json!({ "id": "sg9", "name": "laptops" }));
}

#[tokio::test]
async fn test_device_group_update_and_import() {
    let (server, provider) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v2/systemgroups/sg1"))
        .and(body_json(json!({ "name": "servers" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "sg1",
            "name": "servers",
            "type": "system_group"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/systemgroups/sg1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "sg1",
            "name": "servers"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let prior = json!({ "id": "sg1", "name": "laptops" });
    let updated = plan_and_apply(&provider, DEVICE_GROUP, &json!({ "name": "servers" }), Some(&prior)).await;
    assert_eq!(updated, json!({ "id": "sg1", "name": "servers" }));

    let imported = provider.import_resource_state(DEVICE_GROUP, "sg1").await;
    let read = provider
        .read_resource(DEVICE_GROUP, imported.imported_state.unwrap())
        .await;
    assert_eq!(read.new_state, Some(updated));
}

// ── Provider configuration ──────────────────────────────────────────

#[tokio::test]
async fn test_configure_falls_back_to_environment_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/systemgroups/sg1"))
        .and(header("x-api-key", "from-env"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "sg1",
            "name": "laptops"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = Provider::new("0.1.0")
        .configure_with_settings(&json!({}), &settings(&server, Some("from-env")))
        .unwrap();

    let read = provider
        .read_resource(DEVICE_GROUP, json!({ "id": "sg1", "name": "laptops" }))
        .await;
    assert!(read.diagnostics.is_empty(), "{}", read.diagnostics);
}

#[tokio::test]
async fn test_configure_rejects_empty_and_missing_keys() {
    let server = MockServer::start().await;
    let provider = Provider::new("0.1.0");

    let with_env = settings(&server, Some("from-env"));
    let diags = provider
        .configure_with_settings(&json!({ "api_key": "" }), &with_env)
        .err()
        .unwrap();
    let diag = diags.iter().next().unwrap();
    assert_eq!(diag.summary, "Missing JumpCloud API Key");
    assert_eq!(diag.attribute.as_ref().unwrap().to_string(), "api_key");

    let without_env = settings(&server, None);
    let diags = provider
        .configure_with_settings(&json!({ "api_key": null }), &without_env)
        .err()
        .unwrap();
    assert_eq!(diags.iter().next().unwrap().summary, "Missing JumpCloud API Key");
}

#[tokio::test]
async fn test_configure_rejects_unknown_key() {
    let server = MockServer::start().await;
    let diags = Provider::new("0.1.0")
        .configure_with_settings(
            &json!({ "api_key": jumpcloud_core::value::UNKNOWN_SENTINEL }),
            &settings(&server, Some("from-env")),
        )
        .err()
        .unwrap();
    assert_eq!(diags.iter().next().unwrap().summary, "Missing API Key");
}
