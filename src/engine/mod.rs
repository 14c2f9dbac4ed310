//! The expression engine.
//!
//! [`Engine`] owns the expression buffer, the undo/redo stacks, the
//! memory register and the history log. A presentation layer calls one
//! method per gesture and then reads back whatever it renders; the
//! engine never pushes updates.

pub mod keys;

pub use keys::{Constant, FunctionKey, FunctionShape, Operator};

use crate::core::{Base, HistoryEntry, format_number};
use crate::error::{EvaluateError, ExprError};
use crate::expr::evaluate_str;
use crate::storage::{HistoryStore, MemoryHistoryStore};

/// Placeholder shown while the buffer is empty. Never stored in it.
pub const DISPLAY_PLACEHOLDER: &str = "0";

/// Operator spellings that count as "the buffer already ends with an
/// operator" when they appear space-padded at the end.
const OPERATOR_SPELLINGS: [&str; 10] = ["+", "-", "−", "×", "*", "÷", "/", "%", "^", "**"];

/// Calculator state and the operations on it.
///
/// # Examples
///
/// ```
/// use calcpad::engine::{Engine, Operator};
///
/// let mut engine = Engine::in_memory();
/// engine.append_value("2");
/// engine.append_operator(Operator::Add);
/// engine.append_value("3");
/// assert_eq!(engine.evaluate(), Ok(Some("5".to_string())));
/// assert_eq!(engine.expression(), "5");
/// ```
#[derive(Debug)]
pub struct Engine<S: HistoryStore = MemoryHistoryStore> {
    buffer: String,
    undo_stack: Vec<String>,
    redo_stack: Vec<String>,
    memory: f64,
    history: Vec<HistoryEntry>,
    store: S,
}

impl Engine<MemoryHistoryStore> {
    /// Creates an engine whose history lives only in memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryHistoryStore::new())
    }
}

impl<S: HistoryStore> Engine<S> {
    /// Creates an engine, loading history from `store`.
    ///
    /// A store that fails to load is treated as holding no history.
    pub fn new(store: S) -> Self {
        let history = match store.load() {
            Ok(entries) => {
                tracing::debug!(
                    store = %store.describe(),
                    entries = entries.len(),
                    "loaded history"
                );
                entries
            }
            Err(e) => {
                tracing::warn!(store = %store.describe(), error = %e, "history not loaded, starting empty");
                Vec::new()
            }
        };

        Self {
            buffer: String::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            memory: 0.0,
            history,
            store,
        }
    }

    // ==================== State Readers ====================

    /// The raw expression buffer.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.buffer
    }

    /// Text for the display: the buffer, or `"0"` when it is empty.
    #[must_use]
    pub fn display(&self) -> &str {
        if self.buffer.is_empty() {
            DISPLAY_PLACEHOLDER
        } else {
            &self.buffer
        }
    }

    /// The memory register.
    #[must_use]
    pub const fn memory(&self) -> f64 {
        self.memory
    }

    /// The memory register formatted like a result.
    #[must_use]
    pub fn memory_display(&self) -> String {
        format_number(self.memory)
    }

    /// History in evaluation order.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// History newest first, the order it is displayed in.
    pub fn history_newest_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter().rev()
    }

    /// Whether [`undo`](Self::undo) would change anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether [`redo`](Self::redo) would change anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// The history store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    // ==================== Buffer Editing ====================

    /// Appends a digit, decimal point, parenthesis or other typed text.
    ///
    /// No syntax checking happens here; malformed input fails at
    /// [`evaluate`](Self::evaluate).
    pub fn append_value(&mut self, token: &str) -> &str {
        if self.buffer.is_empty() {
            self.buffer = token.to_string();
        } else {
            self.buffer.push_str(token);
        }
        &self.buffer
    }

    /// Appends ` <op> ` unless the buffer is empty or already ends with
    /// a padded operator.
    pub fn append_operator(&mut self, op: Operator) -> &str {
        if !self.buffer.is_empty() && !self.ends_with_operator() {
            self.buffer.push_str(&op.padded());
        }
        &self.buffer
    }

    /// Applies a function key.
    ///
    /// Prefix functions append `name(`. Wrapping functions (square, cube,
    /// reciprocal) take the *entire* buffer as their argument, and do
    /// nothing on an empty buffer.
    pub fn append_function(&mut self, key: FunctionKey) -> &str {
        match key.shape() {
            FunctionShape::Prefix(name) => {
                self.buffer.push_str(name);
                self.buffer.push('(');
            }
            FunctionShape::Wrap { before, after } => {
                if !self.buffer.is_empty() {
                    self.buffer = format!("{before}{}{after}", self.buffer);
                }
            }
        }
        &self.buffer
    }

    /// Appends a constant's decimal text.
    pub fn append_constant(&mut self, constant: Constant) -> &str {
        let text = constant.text();
        self.append_value(&text)
    }

    /// Removes one trailing character.
    pub fn delete_last(&mut self) -> &str {
        self.buffer.pop();
        &self.buffer
    }

    /// Empties the buffer, leaving an undo checkpoint.
    pub fn clear(&mut self) -> &str {
        self.checkpoint();
        self.buffer.clear();
        &self.buffer
    }

    // ==================== Evaluation ====================

    /// Evaluates the buffer.
    ///
    /// On success the formatted result replaces the buffer, is recorded in
    /// history and returned. An empty buffer is left alone and yields
    /// `Ok(None)`. On failure the buffer is emptied; the pre-evaluation
    /// text stays reachable through [`undo`](Self::undo).
    ///
    /// # Errors
    ///
    /// [`EvaluateError::DivisionByZero`] when the expression divides by
    /// zero, [`EvaluateError::InvalidExpression`] for everything else.
    pub fn evaluate(&mut self) -> Result<Option<String>, EvaluateError> {
        if self.buffer.is_empty() {
            return Ok(None);
        }

        self.checkpoint();

        match evaluate_str(&self.buffer) {
            Ok(value) => {
                let result = format_number(value);
                tracing::debug!(expression = %self.buffer, %result, "evaluated");

                let expression = std::mem::replace(&mut self.buffer, result.clone());
                self.history.push(HistoryEntry::new(expression, result.clone()));
                self.persist_history();
                Ok(Some(result))
            }
            Err(e) => {
                tracing::debug!(expression = %self.buffer, error = %e, "evaluation failed");
                self.buffer.clear();
                Err(e.into())
            }
        }
    }

    // ==================== Memory ====================

    /// Adds the buffer's value to memory and returns the new memory value.
    ///
    /// Undo, redo and history are untouched.
    ///
    /// # Errors
    ///
    /// Returns the evaluation error; memory is unchanged.
    pub fn memory_add(&mut self) -> Result<f64, ExprError> {
        let value = evaluate_str(&self.buffer)?;
        self.memory += value;
        Ok(self.memory)
    }

    /// Subtracts the buffer's value from memory and returns the new memory
    /// value.
    ///
    /// # Errors
    ///
    /// Returns the evaluation error; memory is unchanged.
    pub fn memory_subtract(&mut self) -> Result<f64, ExprError> {
        let value = evaluate_str(&self.buffer)?;
        self.memory -= value;
        Ok(self.memory)
    }

    /// Replaces the buffer with the formatted memory value.
    pub fn memory_recall(&mut self) -> &str {
        self.buffer = format_number(self.memory);
        &self.buffer
    }

    /// Resets memory to zero.
    pub const fn memory_clear(&mut self) {
        self.memory = 0.0;
    }

    // ==================== Base Conversion ====================

    /// Replaces the buffer with its value, truncated to an integer and
    /// written in `base` (`0x…`, `0b…`, `0o…` or decimal).
    ///
    /// # Errors
    ///
    /// Returns the evaluation error, or [`ExprError::Overflow`] for values
    /// beyond `i128`; the buffer is unchanged.
    pub fn base_conversion(&mut self, base: Base) -> Result<&str, ExprError> {
        let value = evaluate_str(&self.buffer)?;
        self.buffer = base.render(value)?;
        Ok(&self.buffer)
    }

    // ==================== Undo / Redo ====================

    /// Restores the most recent checkpoint. No-op when there is none.
    pub fn undo(&mut self) -> &str {
        if let Some(previous) = self.undo_stack.pop() {
            let current = std::mem::replace(&mut self.buffer, previous);
            self.redo_stack.push(current);
        }
        &self.buffer
    }

    /// Re-applies the most recently undone state. No-op when there is none.
    pub fn redo(&mut self) -> &str {
        if let Some(next) = self.redo_stack.pop() {
            let current = std::mem::replace(&mut self.buffer, next);
            self.undo_stack.push(current);
        }
        &self.buffer
    }

    // ==================== History ====================

    /// Puts a past expression (not its result) back into the buffer.
    pub fn load_from_history(&mut self, entry: &HistoryEntry) -> &str {
        self.buffer.clone_from(&entry.expression);
        &self.buffer
    }

    /// Removes every history entry and persists the empty log.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.persist_history();
    }

    // ==================== Internals ====================

    fn checkpoint(&mut self) {
        self.undo_stack.push(self.buffer.clone());
        self.redo_stack.clear();
    }

    fn ends_with_operator(&self) -> bool {
        OPERATOR_SPELLINGS
            .iter()
            .any(|op| self.buffer.ends_with(&format!(" {op} ")))
    }

    /// Saves the log; a failed save is logged and otherwise ignored.
    fn persist_history(&mut self) {
        if let Err(e) = self.store.save(&self.history) {
            tracing::warn!(store = %self.store.describe(), error = %e, "history not saved");
        }
    }
}
