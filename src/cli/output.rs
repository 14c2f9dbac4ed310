//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::HistoryEntry;
use crate::engine::Engine;
use crate::error::{Error, EvaluateError};
use crate::storage::HistoryStore;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Snapshot of what the calculator shows.
#[derive(Debug, Serialize)]
struct StateView<'a> {
    expression: &'a str,
    display: &'a str,
    memory: String,
    can_undo: bool,
    can_redo: bool,
    history_len: usize,
}

/// A history entry with its 1-based, newest-first position.
#[derive(Debug, Serialize)]
struct NumberedEntry<'a> {
    index: usize,
    time: String,
    #[serde(flatten)]
    entry: &'a HistoryEntry,
}

/// Formats a one-shot evaluation result.
#[must_use]
pub fn format_evaluation(expression: &str, result: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{result}\n"),
        OutputFormat::Json => format_json(&serde_json::json!({
            "expression": expression,
            "result": result,
        })),
    }
}

/// Formats the engine display after a sequence of keys.
#[must_use]
pub fn format_state<S: HistoryStore>(engine: &Engine<S>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_state_text(engine),
        OutputFormat::Json => format_json(&StateView {
            expression: engine.expression(),
            display: engine.display(),
            memory: engine.memory_display(),
            can_undo: engine.can_undo(),
            can_redo: engine.can_redo(),
            history_len: engine.history().len(),
        }),
    }
}

fn format_state_text<S: HistoryStore>(engine: &Engine<S>) -> String {
    let mut output = engine.display().to_string();
    let memory = engine.memory_display();
    if memory != "0" {
        let _ = write!(output, "    [M {memory}]");
    }
    output.push('\n');
    output
}

/// Formats an evaluation error shown in place of the display.
#[must_use]
pub fn format_evaluate_error(err: &EvaluateError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{}\n", err.user_message()),
        OutputFormat::Json => format_json(&serde_json::json!({
            "error": err.user_message(),
            "detail": err.to_string(),
        })),
    }
}

/// Formats a history listing, newest first, at most `limit` entries.
#[must_use]
pub fn format_history<'a, I>(entries: I, limit: Option<usize>, format: OutputFormat) -> String
where
    I: IntoIterator<Item = &'a HistoryEntry>,
{
    let numbered: Vec<NumberedEntry<'_>> = entries
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(i, entry)| NumberedEntry {
            index: i + 1,
            time: entry.time_label(),
            entry,
        })
        .collect();

    match format {
        OutputFormat::Text => format_history_text(&numbered),
        OutputFormat::Json => format_json(&numbered),
    }
}

fn format_history_text(entries: &[NumberedEntry<'_>]) -> String {
    if entries.is_empty() {
        return "No history.\n".to_string();
    }

    let mut output = String::new();
    for numbered in entries {
        let _ = writeln!(output, "{:>4}  {}", numbered.index, numbered.entry);
    }
    output
}

/// Formats a plain status message.
#[must_use]
pub fn format_message(message: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{message}\n"),
        OutputFormat::Json => format_json(&serde_json::json!({ "message": message })),
    }
}

/// Formats a crate error for display.
///
/// Evaluation errors use their user-facing message.
#[must_use]
pub fn format_error(err: &Error, format: OutputFormat) -> String {
    let message = match err {
        Error::Eval(e) => e.user_message().to_string(),
        other => format!("Error: {other}"),
    };

    match format {
        OutputFormat::Text => message,
        OutputFormat::Json => format_json(&serde_json::json!({
            "error": message,
            "detail": err.to_string(),
        })),
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize>(value: &T) -> String {
    let mut json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    json.push('\n');
    json
}
