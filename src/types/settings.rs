use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default seconds to wait for the timeline to render before the first pass.
pub const DEFAULT_INIT_WAIT_SECS: f64 = 4.0;

/// Largest accepted `initWaitTime`, in seconds.
pub const MAX_INIT_WAIT_SECS: f64 = 3600.0;

/// Delay between expanding the timeline and extracting entries.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Upper bound on "show more" clicks during one expansion.
pub const DEFAULT_EXPAND_MAX_ATTEMPTS: u32 = 25;

/// Keys of the scalar records in the `settings` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Debug,
    InitWaitTime,
}

impl SettingKey {
    pub const ALL: [SettingKey; 2] = [SettingKey::Debug, SettingKey::InitWaitTime];

    /// Key as stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::Debug => "debug",
            SettingKey::InitWaitTime => "initWaitTime",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    /// Value written when the settings table is first created.
    pub fn default_value(self) -> serde_json::Value {
        match self {
            SettingKey::Debug => serde_json::Value::Bool(false),
            SettingKey::InitWaitTime => serde_json::json!(4),
        }
    }
}

/// Runtime configuration handed to engine components at construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Enables verbose per-entry logging.
    pub debug: bool,
    /// Wait before expanding and extracting the timeline.
    pub init_wait: Duration,
    pub settle_delay: Duration,
    pub expand_max_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debug: false,
            init_wait: Duration::from_secs_f64(DEFAULT_INIT_WAIT_SECS),
            settle_delay: DEFAULT_SETTLE_DELAY,
            expand_max_attempts: DEFAULT_EXPAND_MAX_ATTEMPTS,
        }
    }
}

impl EngineConfig {
    /// Config with no waits, for driving the engine from tests or a bridge
    /// that already knows the page is rendered.
    pub fn immediate() -> Self {
        Self {
            init_wait: Duration::ZERO,
            settle_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}
