use std::fmt;

// === StoreError ===

/// Errors raised by the persistent store.
///
/// Callers inside the engine log these and degrade; they never reach the
/// collaborator.
#[derive(Debug)]
pub enum StoreError {
    /// The database could not be opened, read or written.
    Unavailable(String),
    /// A stored blob could not be serialized or deserialized.
    SerializationError(String),
    /// The blocking storage task panicked or was cancelled.
    TaskFailed(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            StoreError::SerializationError(msg) => {
                write!(f, "Storage serialization error: {}", msg)
            }
            StoreError::TaskFailed(msg) => write!(f, "Storage task failed: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::SerializationError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::TaskFailed(err.to_string())
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// The provided settings key is not one of the known settings.
    InvalidKey(String),
    /// The provided settings value has the wrong type or range.
    InvalidValue(String),
    /// The settings table could not be written.
    StoreError(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
            SettingsError::StoreError(msg) => write!(f, "Settings store error: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<StoreError> for SettingsError {
    fn from(err: StoreError) -> Self {
        SettingsError::StoreError(err.to_string())
    }
}

// === AppError ===

/// Errors that can stop the engine from starting at all.
#[derive(Debug)]
pub enum AppError {
    /// The database could not be opened or migrated.
    DatabaseError(String),
    /// The state writer was already handed to another reconciler.
    StateWriterTaken,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::StateWriterTaken => {
                write!(f, "Visibility state writer already claimed")
            }
        }
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
