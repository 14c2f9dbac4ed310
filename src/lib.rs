//! # calcpad
//!
//! A keypad calculator engine with a terminal front end.
//!
//! The [`Engine`] holds an expression buffer that keypad gestures edit,
//! evaluates it with a sandboxed arithmetic evaluator, and keeps a memory
//! register, undo/redo stacks and a persisted history log.
//!
//! ## Features
//!
//! - **Sandboxed evaluation**: a recursive-descent parser over a closed
//!   set of operators and functions; no other names are reachable
//! - **Undo/redo**: checkpoints on clear and evaluate
//! - **Memory**: `M+`, `M-`, `MR`, `MC`
//! - **Base conversion**: hex, binary, octal and decimal
//! - **History**: JSON file store with atomic writes
//!
//! ## Example
//!
//! ```
//! use calcpad::{Engine, FunctionKey};
//!
//! let mut engine = Engine::in_memory();
//! engine.append_function(FunctionKey::Sqrt);
//! engine.append_value("16");
//! engine.append_value(")");
//! assert_eq!(engine.evaluate(), Ok(Some("4".to_string())));
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod engine;
pub mod error;
pub mod expr;
pub mod storage;

// Re-export commonly used types at crate root
pub use error::{Error, EvaluateError, ExprError, Result};

// Re-export core domain types
pub use core::{Base, HistoryEntry, format_number};

// Re-export engine types
pub use engine::{Constant, Engine, FunctionKey, Operator};

// Re-export storage types
pub use storage::{HistoryStore, JsonHistoryStore, MemoryHistoryStore, default_history_path};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
