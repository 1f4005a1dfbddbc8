//! Unit tests for the SettingsEngine against an on-disk store.

use std::time::Duration;

use exercise_visibility::database::PersistentStore;
use exercise_visibility::services::settings_engine::SettingsEngine;
use exercise_visibility::types::settings::{EngineConfig, SettingKey};
use rstest::rstest;
use serde_json::json;
use tempfile::TempDir;

fn setup() -> (SettingsEngine, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let store = PersistentStore::open(tmp.path().join("settings.sqlite3")).unwrap();
    (SettingsEngine::new(store), tmp)
}

#[tokio::test]
async fn test_settings_survive_reopen() {
    let (engine, tmp) = setup();
    engine.set_value("debug", json!(true)).await.unwrap();
    engine.set_value("initWaitTime", json!(2)).await.unwrap();
    drop(engine);

    let store = PersistentStore::open(tmp.path().join("settings.sqlite3")).unwrap();
    let reopened = SettingsEngine::new(store);
    let config = reopened.load_config().await;
    assert!(config.debug);
    assert_eq!(config.init_wait, Duration::from_secs(2));
}

#[tokio::test]
async fn test_settings_are_independent() {
    let (engine, _tmp) = setup();
    engine.set_value("initWaitTime", json!(10)).await.unwrap();
    assert_eq!(engine.get(SettingKey::Debug).await, Some(json!(false)));
    assert_eq!(engine.get(SettingKey::InitWaitTime).await, Some(json!(10)));
}

#[rstest]
#[case("debug", json!(1))]
#[case("debug", json!(null))]
#[case("initWaitTime", json!("4"))]
#[case("initWaitTime", json!(-0.5))]
#[case("initWaitTime", json!(3600.5))]
#[case("initWaitTime", json!(1e300))]
#[tokio::test]
async fn test_invalid_values_are_rejected(#[case] key: &str, #[case] value: serde_json::Value) {
    let (engine, _tmp) = setup();
    assert!(engine.set_value(key, value).await.is_err());
    assert_eq!(engine.load_config().await.debug, EngineConfig::default().debug);
}

#[tokio::test]
async fn test_get_value_by_name() {
    let (engine, _tmp) = setup();
    assert_eq!(engine.get_value("initWaitTime").await.unwrap(), Some(json!(4)));
    assert!(engine.get_value("nonexistent").await.is_err());
}

#[tokio::test]
async fn test_config_keeps_fixed_defaults() {
    let (engine, _tmp) = setup();
    let config = engine.load_config().await;
    let defaults = EngineConfig::default();
    assert_eq!(config.settle_delay, defaults.settle_delay);
    assert_eq!(config.expand_max_attempts, defaults.expand_max_attempts);
}

#[tokio::test]
async fn test_huge_init_wait_is_rejected_and_config_still_loads() {
    let (engine, _tmp) = setup();
    assert!(engine.set_value("initWaitTime", json!(1e300)).await.is_err());
    assert_eq!(engine.get(SettingKey::InitWaitTime).await, Some(json!(4)));
    assert_eq!(engine.load_config().await.init_wait, Duration::from_secs(4));
}

#[tokio::test]
async fn test_out_of_range_stored_init_wait_falls_back_to_default() {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let path = tmp.path().join("settings.sqlite3");
    let store = PersistentStore::open(&path).unwrap();
    store
        .put_setting(SettingKey::InitWaitTime, &json!(1e300))
        .await
        .unwrap();
    drop(store);

    let engine = SettingsEngine::new(PersistentStore::open(&path).unwrap());
    let config = engine.load_config().await;
    assert_eq!(config.init_wait, EngineConfig::default().init_wait);
}

#[tokio::test]
async fn test_init_wait_upper_bound_is_accepted() {
    let (engine, _tmp) = setup();
    engine.set_value("initWaitTime", json!(3600)).await.unwrap();
    assert_eq!(engine.load_config().await.init_wait, Duration::from_secs(3600));
}
