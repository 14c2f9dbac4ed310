//! In-memory history store.

use crate::core::HistoryEntry;
use crate::error::Result;
use crate::storage::traits::HistoryStore;

/// Keeps the log in memory only.
///
/// Used for `--no-history` sessions and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    entries: Vec<HistoryEntry>,
    saves: usize,
}

impl MemoryHistoryStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            saves: 0,
        }
    }

    /// Creates a store pre-seeded with `entries`.
    #[must_use]
    pub const fn with_entries(entries: Vec<HistoryEntry>) -> Self {
        Self { entries, saves: 0 }
    }

    /// The last saved log.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of times [`HistoryStore::save`] has been called.
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[HistoryEntry]) -> Result<()> {
        self.entries = entries.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_replaces_log() {
        let mut store = MemoryHistoryStore::new();
        store
            .save(&[HistoryEntry::with_timestamp(1, "1 + 1", "2")])
            .unwrap();
        store
            .save(&[HistoryEntry::with_timestamp(2, "2 + 2", "4")])
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].result, "4");
        assert_eq!(store.save_count(), 2);
    }

    #[test]
    fn test_seeded_store_loads_entries() {
        let store = MemoryHistoryStore::with_entries(vec![HistoryEntry::with_timestamp(
            1, "3 × 3", "9",
        )]);
        assert_eq!(store.load().unwrap().len(), 1);
        assert_eq!(store.save_count(), 0);
    }
}
