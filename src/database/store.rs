//! Async persistent store over the SQLite database.
//!
//! Two logical tables live here: `states`, a single record holding the whole
//! hide map, and `settings`, one JSON scalar per key. Blocking rusqlite work
//! runs on tokio's blocking pool; one connection is shared process-wide.
//!
//! Writing the hide map requires a [`StateWriter`], which
//! [`PersistentStore::take_state_writer`] hands out exactly once.

use std::future::Future;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::connection::Database;
use crate::types::errors::StoreError;
use crate::types::settings::SettingKey;
use crate::types::visibility::VisibilityState;

/// Sentinel id of the one record in the `states` table.
pub const STATE_RECORD_ID: &str = "visibilityState";

/// Shared handle to the store. Cloning is cheap and shares the connection.
#[derive(Clone)]
pub struct PersistentStore {
    db: Arc<Mutex<Database>>,
    writer_claimed: Arc<AtomicBool>,
}

impl PersistentStore {
    /// Opens (or creates) the store at `path`, creating parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Unavailable(format!(
                        "Failed to create data directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        let db = Database::open(path)?;
        debug!(path = %path.display(), "Opened visibility store");
        Ok(Self::from_database(db))
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self::from_database(Database::open_in_memory()?))
    }

    pub fn from_database(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            writer_claimed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Claims the write capability for the `states` table.
    ///
    /// Returns `None` once a writer has already been handed out by this
    /// store or any of its clones.
    pub fn take_state_writer(&self) -> Option<StateWriter> {
        if self.writer_claimed.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(StateWriter {
            store: self.clone(),
        })
    }

    /// Reads the stored hide map. `None` when nothing has been stored yet.
    pub async fn get_states(&self) -> Result<Option<VisibilityState>, StoreError> {
        self.with_conn(|conn| {
            let data: Option<String> = conn
                .query_row(
                    "SELECT data FROM states WHERE id = ?1",
                    params![STATE_RECORD_ID],
                    |row| row.get(0),
                )
                .optional()?;
            match data {
                Some(json) => Ok(Some(serde_json::from_str(&json)?)),
                None => Ok(None),
            }
        })
        .await
    }

    /// Reads one raw setting value. `None` when the record is missing.
    pub async fn get_setting(&self, key: SettingKey) -> Result<Option<serde_json::Value>, StoreError> {
        self.with_conn(move |conn| {
            let raw: Option<String> = conn
                .query_row(
                    "SELECT value FROM settings WHERE key = ?1",
                    params![key.as_str()],
                    |row| row.get(0),
                )
                .optional()?;
            match raw {
                Some(json) => Ok(Some(serde_json::from_str(&json)?)),
                None => Ok(None),
            }
        })
        .await
    }

    pub async fn put_setting(&self, key: SettingKey, value: &serde_json::Value) -> Result<(), StoreError> {
        let raw = value.to_string();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key.as_str(), raw],
            )?;
            Ok(())
        })
        .await
    }

    async fn put_states(&self, state: &VisibilityState) -> Result<(), StoreError> {
        let data = serde_json::to_string(state)?;
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO states (id, data) VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET data = excluded.data",
                params![STATE_RECORD_ID, data],
            )?;
            Ok(())
        })
        .await
    }

    /// Runs `f` against the shared connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let guard = db
                .lock()
                .map_err(|e| StoreError::Unavailable(format!("Store lock poisoned: {}", e)))?;
            f(guard.connection())
        })
        .await?
    }
}

/// Load/save seam the reconciler is written against.
pub trait StateStoreTrait {
    /// Loads the hide map; an absent record is an empty map.
    fn load(&self) -> impl Future<Output = Result<VisibilityState, StoreError>> + Send;
    /// Replaces the stored hide map.
    fn save(&self, state: &VisibilityState) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// The only handle able to write the `states` table.
pub struct StateWriter {
    store: PersistentStore,
}

impl StateWriter {
    /// A read-only handle sharing the same connection.
    pub fn store(&self) -> &PersistentStore {
        &self.store
    }
}

impl StateStoreTrait for StateWriter {
    async fn load(&self) -> Result<VisibilityState, StoreError> {
        Ok(self.store.get_states().await?.unwrap_or_default())
    }

    async fn save(&self, state: &VisibilityState) -> Result<(), StoreError> {
        self.store.put_states(state).await
    }
}
