//! History store trait definition.
//!
//! Defines the interface for persisted history backends, enabling
//! pluggable storage implementations.

use crate::core::HistoryEntry;
use crate::error::Result;

/// Trait for history persistence backends.
///
/// The engine owns the authoritative log and hands the full log to
/// [`save`](Self::save) after every change; backends overwrite rather
/// than append.
pub trait HistoryStore {
    /// Loads the persisted log in evaluation order.
    ///
    /// A store with nothing saved yet returns an empty log.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing data cannot be read or parsed.
    fn load(&self) -> Result<Vec<HistoryEntry>>;

    /// Replaces the persisted log with `entries`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save(&mut self, entries: &[HistoryEntry]) -> Result<()>;

    /// Human-readable location, used in log messages.
    fn describe(&self) -> String;
}
