//! Core domain models for calcpad.
//!
//! History records and number formatting. These are pure domain models
//! with no I/O dependencies.

pub mod history;
pub mod number;

pub use history::HistoryEntry;
pub use number::{Base, DECIMAL_PLACES, format_number, round_decimal};
