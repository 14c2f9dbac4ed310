//! Calculation history records.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between expression and result in a history line.
pub const LINE_SEPARATOR: &str = " = ";

/// One successful evaluation.
///
/// Entries are created by the engine, never mutated, and removed only
/// when the whole history is cleared.
///
/// # Examples
///
/// ```
/// use calcpad::core::HistoryEntry;
///
/// let entry = HistoryEntry::new("2 + 3", "5");
/// assert_eq!(entry.line(), "2 + 3 = 5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unix timestamp (seconds) of the evaluation.
    pub timestamp: i64,

    /// Expression exactly as it stood in the buffer.
    pub expression: String,

    /// Formatted result.
    pub result: String,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self::with_timestamp(current_timestamp(), expression, result)
    }

    /// Creates an entry with an explicit timestamp.
    pub fn with_timestamp(
        timestamp: i64,
        expression: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            expression: expression.into(),
            result: result.into(),
        }
    }

    /// Parses a bare `"<expression> = <result>"` line.
    ///
    /// Splits on the last separator, since the expression side is free
    /// text. The timestamp is unknown and set to 0.
    #[must_use]
    pub fn from_line(line: &str) -> Option<Self> {
        let (expression, result) = line.rsplit_once(LINE_SEPARATOR)?;
        if expression.is_empty() || result.is_empty() {
            return None;
        }
        Some(Self::with_timestamp(0, expression, result))
    }

    /// `"<expression> = <result>"`.
    #[must_use]
    pub fn line(&self) -> String {
        format!("{}{LINE_SEPARATOR}{}", self.expression, self.result)
    }

    /// Local wall-clock time of the evaluation as `HH:MM:SS`, or
    /// `--:--:--` when the timestamp is unknown.
    #[must_use]
    pub fn time_label(&self) -> String {
        if self.timestamp <= 0 {
            return "--:--:--".to_string();
        }
        DateTime::from_timestamp(self.timestamp, 0).map_or_else(
            || "--:--:--".to_string(),
            |utc| utc.with_timezone(&Local).format("%H:%M:%S").to_string(),
        )
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.time_label(), self.line())
    }
}

/// Returns the current Unix timestamp in seconds.
fn current_timestamp() -> i64 {
    Local::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_stamped() {
        let entry = HistoryEntry::new("1 + 1", "2");
        assert!(entry.timestamp > 0);
        assert_eq!(entry.expression, "1 + 1");
        assert_eq!(entry.result, "2");
    }

    #[test]
    fn test_from_line_splits_on_last_separator() {
        let entry = HistoryEntry::from_line("2 + 3 = 5").unwrap();
        assert_eq!(entry.expression, "2 + 3");
        assert_eq!(entry.result, "5");
        assert_eq!(entry.timestamp, 0);
    }

    #[test]
    fn test_from_line_rejects_garbage() {
        assert!(HistoryEntry::from_line("no separator").is_none());
        assert!(HistoryEntry::from_line(" = 5").is_none());
        assert!(HistoryEntry::from_line("2 + 3 = ").is_none());
    }

    #[test]
    fn test_display_has_time_prefix() {
        let entry = HistoryEntry::with_timestamp(0, "sqrt(4)", "2");
        assert_eq!(entry.to_string(), "[--:--:--] sqrt(4) = 2");

        let stamped = HistoryEntry::new("sqrt(4)", "2");
        let rendered = stamped.to_string();
        assert!(rendered.starts_with('['));
        assert_eq!(rendered.find(']'), Some(9));
        assert!(rendered.ends_with("sqrt(4) = 2"));
    }

    #[test]
    fn test_serialization() {
        let entry = HistoryEntry::with_timestamp(1_700_000_000, "7 ÷ 2", "3.5");
        let json = serde_json::to_string(&entry).unwrap();
        let back: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
