//! Storage layer for calcpad.
//!
//! Persists the calculation history. The engine talks to a
//! [`HistoryStore`]; [`JsonHistoryStore`] keeps the log in a JSON file and
//! [`MemoryHistoryStore`] keeps it in memory.

pub mod json;
pub mod memory;
pub mod traits;

pub use json::JsonHistoryStore;
pub use memory::MemoryHistoryStore;
pub use traits::HistoryStore;

use std::path::PathBuf;

/// Application directory name under the platform data directory.
pub const APP_DIR_NAME: &str = "calcpad";

/// History file name.
pub const DEFAULT_HISTORY_FILE: &str = "history.json";

/// Fallback history path relative to the working directory, used when
/// the platform has no data directory.
pub const FALLBACK_HISTORY_PATH: &str = ".calcpad/history.json";

/// Default history file location: `<data_dir>/calcpad/history.json`.
#[must_use]
pub fn default_history_path() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from(FALLBACK_HISTORY_PATH),
        |dir| dir.join(APP_DIR_NAME).join(DEFAULT_HISTORY_FILE),
    )
}
