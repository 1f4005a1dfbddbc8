// Settings Engine
// Reads and writes the independent scalar settings (`debug`, `initWaitTime`)
// and folds them into an `EngineConfig`.
// Reads never fail: a storage error is logged and treated as a missing value.

use std::time::Duration;

use tracing::{debug, warn};

use crate::database::PersistentStore;
use crate::types::errors::SettingsError;
use crate::types::settings::{EngineConfig, SettingKey, DEFAULT_INIT_WAIT_SECS, MAX_INIT_WAIT_SECS};

/// Settings access backed by the `settings` table.
#[derive(Clone)]
pub struct SettingsEngine {
    store: PersistentStore,
}

impl SettingsEngine {
    pub fn new(store: PersistentStore) -> Self {
        Self { store }
    }

    /// Returns the stored value for `key`, or `None` if missing or unreadable.
    pub async fn get(&self, key: SettingKey) -> Option<serde_json::Value> {
        match self.store.get_setting(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "Failed to read setting");
                None
            }
        }
    }

    /// Looks up a setting by its stored name.
    pub async fn get_value(&self, key: &str) -> Result<Option<serde_json::Value>, SettingsError> {
        let key = parse_key(key)?;
        Ok(self.get(key).await)
    }

    /// Returns every known setting, `null` for unreadable ones.
    pub async fn get_all(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut all = serde_json::Map::new();
        for key in SettingKey::ALL {
            let value = self.get(key).await.unwrap_or(serde_json::Value::Null);
            all.insert(key.as_str().to_string(), value);
        }
        all
    }

    /// Validates and stores a single setting.
    ///
    /// # Examples
    /// - `"debug"` accepts `true` / `false`
    /// - `"initWaitTime"` accepts a number of seconds in `0..=3600`
    pub async fn set_value(&self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        let key = parse_key(key)?;
        validate(key, &value)?;
        self.store.put_setting(key, &value).await?;
        debug!(key = key.as_str(), value = %value, "Setting updated");
        Ok(())
    }

    /// Restores every setting to its default.
    pub async fn reset(&self) -> Result<(), SettingsError> {
        for key in SettingKey::ALL {
            self.store.put_setting(key, &key.default_value()).await?;
        }
        Ok(())
    }

    /// Builds the engine configuration, falling back to defaults for any
    /// missing, unreadable or ill-typed value.
    pub async fn load_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default();

        if let Some(debug) = self.get(SettingKey::Debug).await.and_then(|v| v.as_bool()) {
            config.debug = debug;
        }

        let wait = self
            .get(SettingKey::InitWaitTime)
            .await
            .and_then(|v| v.as_f64())
            .filter(|secs| is_valid_wait(*secs));
        match wait.and_then(|secs| Duration::try_from_secs_f64(secs).ok()) {
            Some(init_wait) => config.init_wait = init_wait,
            None => warn!(
                default_secs = DEFAULT_INIT_WAIT_SECS,
                "Stored initWaitTime is missing or out of range, using default"
            ),
        }

        config
    }
}

fn parse_key(key: &str) -> Result<SettingKey, SettingsError> {
    if key.is_empty() {
        return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
    }
    SettingKey::parse(key)
        .ok_or_else(|| SettingsError::InvalidKey(format!("Key '{}' not found in settings", key)))
}

fn is_valid_wait(secs: f64) -> bool {
    (0.0..=MAX_INIT_WAIT_SECS).contains(&secs)
}

fn validate(key: SettingKey, value: &serde_json::Value) -> Result<(), SettingsError> {
    match key {
        SettingKey::Debug if value.is_boolean() => Ok(()),
        SettingKey::Debug => Err(SettingsError::InvalidValue(format!(
            "'debug' expects a boolean, got {}",
            value
        ))),
        SettingKey::InitWaitTime => match value.as_f64() {
            Some(secs) if is_valid_wait(secs) => Ok(()),
            _ => Err(SettingsError::InvalidValue(format!(
                "'initWaitTime' expects between 0 and {} seconds, got {}",
                MAX_INIT_WAIT_SECS, value
            ))),
        },
    }
}
