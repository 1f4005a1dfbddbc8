// Linux data path: ~/.local/share/exercise-visibility

use std::env;
use std::path::PathBuf;

/// Uses `$XDG_DATA_HOME/exercise-visibility` if set, otherwise `~/.local/share/exercise-visibility`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("exercise-visibility")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("exercise-visibility")
    }
}
