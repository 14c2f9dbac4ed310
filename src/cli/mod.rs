//! CLI layer for calcpad.
//!
//! Provides the command-line interface using clap: one-shot evaluation,
//! scripted key presses, history management and an interactive session
//! that reads keypad gestures from stdin.

pub mod commands;
pub mod keys;
pub mod output;
pub mod parser;

pub use commands::{execute, run_session};
pub use keys::{Feedback, Key};
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
