//! JSON file history store.
//!
//! The whole log is one JSON array, rewritten on every save. Writes go
//! to a sibling temporary file that is then renamed over the target, so
//! a crash mid-write leaves the previous log intact.

use crate::core::HistoryEntry;
use crate::error::{IoError, Result, StorageError};
use crate::storage::traits::HistoryStore;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One element of the persisted array.
///
/// Older logs stored bare `"<expression> = <result>"` strings; both
/// shapes are accepted on load, only full entries are written.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecord {
    Entry(HistoryEntry),
    Line(String),
}

/// File-backed history store.
///
/// # Examples
///
/// ```no_run
/// use calcpad::storage::{HistoryStore, JsonHistoryStore};
///
/// let store = JsonHistoryStore::new("history.json");
/// let entries = store.load().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    /// Creates a store for `path`. Nothing is touched until load/save.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the history file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn path_string(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl HistoryStore for JsonHistoryStore {
    fn load(&self) -> Result<Vec<HistoryEntry>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(IoError::ReadFailed {
                    path: self.path_string(),
                    reason: e.to_string(),
                }
                .into());
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<StoredRecord> =
            serde_json::from_str(&content).map_err(|e| StorageError::Malformed {
                path: self.path_string(),
                reason: e.to_string(),
            })?;

        let entries = records
            .into_iter()
            .filter_map(|record| match record {
                StoredRecord::Entry(entry) => Some(entry),
                StoredRecord::Line(line) => {
                    let entry = HistoryEntry::from_line(&line);
                    if entry.is_none() {
                        tracing::debug!(%line, "skipping unreadable history line");
                    }
                    entry
                }
            })
            .collect();

        Ok(entries)
    }

    fn save(&mut self, entries: &[HistoryEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| IoError::DirectoryFailed {
                path: parent.to_string_lossy().to_string(),
                reason: e.to_string(),
            })?;
        }

        let json = serde_json::to_string_pretty(entries).map_err(StorageError::from)?;
        let temp = self.temp_path();
        let write_failed = |e: std::io::Error| IoError::WriteFailed {
            path: self.path_string(),
            reason: e.to_string(),
        };

        fs::write(&temp, json).map_err(write_failed)?;
        fs::rename(&temp, &self.path).map_err(write_failed)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonHistoryStore {
        JsonHistoryStore::new(dir.path().join("history.json"))
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let entries = vec![
            HistoryEntry::with_timestamp(10, "2 + 3", "5"),
            HistoryEntry::with_timestamp(11, "5 × 2", "10"),
        ];
        store.save(&entries).unwrap();
        assert_eq!(store.load().unwrap(), entries);
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store
            .save(&[HistoryEntry::with_timestamp(1, "1 + 1", "2")])
            .unwrap();
        store.save(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonHistoryStore::new(dir.path().join("nested/deeper/history.json"));
        store
            .save(&[HistoryEntry::with_timestamp(1, "1", "1")])
            .unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(
            store.load(),
            Err(Error::Storage(StorageError::Malformed { .. }))
        ));
    }

    #[test]
    fn test_blank_file_is_empty_history() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "  \n").unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_legacy_lines_are_imported() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"["2 + 3 = 5", "garbage", {"timestamp": 5, "expression": "sqrt(4)", "result": "2"}]"#,
        )
        .unwrap();

        let entries = store.load().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].expression, "2 + 3");
        assert_eq!(entries[0].timestamp, 0);
        assert_eq!(entries[1].result, "2");
    }
}
