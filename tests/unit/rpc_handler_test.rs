//! Unit tests for the RPC handler — every method dispatched by `handle_method`.
//!
//! These tests go through the same code path as the `exercise-visibility-rpc`
//! binary, using a temporary on-disk SQLite database.

use serde_json::json;
use tempfile::TempDir;

use exercise_visibility::app::App;
use exercise_visibility::rpc_handler::handle_method;

/// Create a fresh App backed by a temp directory DB.
async fn setup() -> (App, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let db_path = tmp.path().join("test.sqlite3");
    let app = App::open(&db_path).await.expect("Failed to init App");
    (app, tmp)
}

fn timeline() -> serde_json::Value {
    json!({
        "entries": [
            {"course_label": "יש להגיש את 'מטלה' · Math", "exercise_label": "HW1", "node_id": "n0"},
            {"course_label": "Math", "exercise_label": "HW2"},
            {"course_label": null, "exercise_label": "orphan"}
        ],
        "groups": [
            {"header_id": "mon", "children": [0]},
            {"header_id": "tue", "children": [1, 2]}
        ]
    })
}

// ─── Ping ───

#[tokio::test]
async fn test_ping() {
    let (mut app, _tmp) = setup().await;
    let res = handle_method(&mut app, "ping", &json!({})).await.unwrap();
    assert_eq!(res, json!({"pong": true}));
}

// ─── Unknown method ───

#[tokio::test]
async fn test_unknown_method_returns_error() {
    let (mut app, _tmp) = setup().await;
    let res = handle_method(&mut app, "nonexistent.method", &json!({})).await;
    assert!(res.unwrap_err().contains("unknown method"));
}

// ─── Timeline ───

#[tokio::test]
async fn test_reconcile_returns_render_plan() {
    let (mut app, _tmp) = setup().await;
    let res = handle_method(&mut app, "timeline.reconcile", &timeline()).await.unwrap();

    let entries = res["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["unique_key"], "Math::HW1");
    assert_eq!(entries[0]["node_id"], "n0");
    assert_eq!(res["decisions"]["Math::HW1"], "visible");
    assert_eq!(res["headers"][0], json!({"header_id": "mon", "visible": true}));
}

#[tokio::test]
async fn test_reconcile_requires_entries() {
    let (mut app, _tmp) = setup().await;
    let res = handle_method(&mut app, "timeline.reconcile", &json!({})).await;
    assert_eq!(res.unwrap_err(), "missing entries");

    let res = handle_method(&mut app, "timeline.reconcile", &json!({"entries": 5})).await;
    assert!(res.unwrap_err().starts_with("invalid entries"));
}

#[tokio::test]
async fn test_toggle_and_state() {
    let (mut app, _tmp) = setup().await;
    handle_method(&mut app, "timeline.reconcile", &timeline()).await.unwrap();

    let res = handle_method(&mut app, "timeline.toggle", &json!({"key": "Math::HW1", "hide": true}))
        .await
        .unwrap();
    assert_eq!(res["decisions"]["Math::HW1"], "hidden");
    assert_eq!(res["headers"][0]["visible"], false);
    assert_eq!(res["headers"][1]["visible"], true);

    let state = handle_method(&mut app, "timeline.state", &json!({})).await.unwrap();
    assert_eq!(state, json!({"hidden": {"Math::HW1": false}}));

    handle_method(&mut app, "timeline.toggle", &json!({"key": "Math::HW1", "hide": false}))
        .await
        .unwrap();
    let state = handle_method(&mut app, "timeline.state", &json!({})).await.unwrap();
    assert_eq!(state, json!({"hidden": {}}));
}

#[tokio::test]
async fn test_toggle_requires_params() {
    let (mut app, _tmp) = setup().await;
    let res = handle_method(&mut app, "timeline.toggle", &json!({"hide": true})).await;
    assert_eq!(res.unwrap_err(), "missing key");
    let res = handle_method(&mut app, "timeline.toggle", &json!({"key": "A::1"})).await;
    assert_eq!(res.unwrap_err(), "missing hide");
}

// ─── Settings ───

#[tokio::test]
async fn test_settings_get_all_and_single() {
    let (mut app, _tmp) = setup().await;
    let all = handle_method(&mut app, "settings.get", &json!({})).await.unwrap();
    assert_eq!(all, json!({"debug": false, "initWaitTime": 4}));

    let one = handle_method(&mut app, "settings.get", &json!({"key": "initWaitTime"}))
        .await
        .unwrap();
    assert_eq!(one, json!({"key": "initWaitTime", "value": 4}));
}

#[tokio::test]
async fn test_settings_set_reloads_config() {
    let (mut app, _tmp) = setup().await;
    handle_method(&mut app, "settings.set", &json!({"key": "debug", "value": true}))
        .await
        .unwrap();
    assert!(app.config().debug);

    handle_method(&mut app, "settings.reset", &json!({})).await.unwrap();
    assert!(!app.config().debug);
}

#[tokio::test]
async fn test_settings_set_rejects_bad_input() {
    let (mut app, _tmp) = setup().await;
    let res = handle_method(&mut app, "settings.set", &json!({"key": "theme", "value": 1})).await;
    assert!(res.unwrap_err().contains("Invalid settings key"));
    let res = handle_method(&mut app, "settings.set", &json!({"key": "debug", "value": "on"})).await;
    assert!(res.unwrap_err().contains("Invalid settings value"));
    let res = handle_method(&mut app, "settings.set", &json!({"key": "debug"})).await;
    assert_eq!(res.unwrap_err(), "missing value");
}

#[tokio::test]
async fn test_settings_set_rejects_huge_init_wait_and_keeps_serving() {
    let (mut app, _tmp) = setup().await;
    let res = handle_method(
        &mut app,
        "settings.set",
        &json!({"key": "initWaitTime", "value": 1e300}),
    )
    .await;
    assert!(res.unwrap_err().contains("Invalid settings value"));
    assert_eq!(app.config().init_wait, std::time::Duration::from_secs(4));

    let res = handle_method(&mut app, "ping", &json!({})).await.unwrap();
    assert_eq!(res, json!({"pong": true}));
}
