//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::storage::default_history_path;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// calcpad: a keypad calculator with memory, undo and history.
///
/// Without a subcommand, reads keypad gestures from standard input.
#[derive(Parser, Debug)]
#[command(name = "calcpad")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the history file.
    ///
    /// Defaults to `calcpad/history.json` in the platform data directory.
    #[arg(long, env = "CALCPAD_HISTORY", global = true)]
    pub history_path: Option<PathBuf>,

    /// Keep history in memory only for this run.
    #[arg(long, global = true)]
    pub no_history: bool,

    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute (default: repl).
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate an expression and record it in history.
    Eval {
        /// Expression text; multiple words are joined with spaces.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        expression: Vec<String>,
    },

    /// Press a sequence of keys and print the final display.
    ///
    /// Example: `calcpad keys 2 + 3 =`
    Keys {
        /// Keys, one per word (digits, + - * / % ^, sqrt, =, C, DEL,
        /// undo, redo, M+, M-, MR, MC, hex, bin, oct, dec, pi, e, ...).
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        keys: Vec<String>,
    },

    /// List or clear the calculation history.
    History {
        /// Remove every entry.
        #[arg(long)]
        clear: bool,

        /// Show at most this many entries (newest first).
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Read keys line by line from standard input.
    Repl,
}

impl Cli {
    /// Returns the history path, using the default if not specified.
    #[must_use]
    pub fn get_history_path(&self) -> PathBuf {
        self.history_path
            .clone()
            .unwrap_or_else(default_history_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(history_path: Option<PathBuf>) -> Cli {
        Cli {
            history_path,
            no_history: false,
            verbose: false,
            format: "text".to_string(),
            command: None,
        }
    }

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_history_path() {
        assert_eq!(cli(None).get_history_path(), default_history_path());
    }

    #[test]
    fn test_custom_history_path() {
        let cli = cli(Some(PathBuf::from("/custom/history.json")));
        assert_eq!(
            cli.get_history_path(),
            PathBuf::from("/custom/history.json")
        );
    }

    #[test]
    fn test_keys_accept_hyphen_words() {
        let cli = Cli::try_parse_from(["calcpad", "keys", "5", "-", "2", "M-", "="]).unwrap();
        match cli.command {
            Some(Commands::Keys { keys }) => assert_eq!(keys, ["5", "-", "2", "M-", "="]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_eval_collects_words() {
        let cli = Cli::try_parse_from(["calcpad", "--no-history", "eval", "-2", "^", "2"]).unwrap();
        assert!(cli.no_history);
        match cli.command {
            Some(Commands::Eval { expression }) => assert_eq!(expression.join(" "), "-2 ^ 2"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_no_subcommand_is_repl() {
        let cli = Cli::try_parse_from(["calcpad"]).unwrap();
        assert!(cli.command.is_none());
    }
}
