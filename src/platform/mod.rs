// Exercise visibility platform paths
// Resolves where the store lives on Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` to select the platform implementation at compile time.

use std::path::PathBuf;

use crate::database::connection::DATABASE_FILE_NAME;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific data directory for the engine.
///
/// - **Linux**: `~/.local/share/exercise-visibility` (or `$XDG_DATA_HOME/exercise-visibility`)
/// - **macOS**: `~/Library/Application Support/ExerciseVisibility`
/// - **Windows**: `%APPDATA%/ExerciseVisibility`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

/// Default location of the store file.
pub fn default_database_path() -> PathBuf {
    get_data_dir().join(DATABASE_FILE_NAME)
}
