//! Error types for calcpad operations.
//!
//! This module provides the error hierarchy using `thiserror`: positioned
//! expression errors from the evaluator, the two evaluation failures the
//! engine surfaces, and crate-level errors for storage, I/O and commands.

use thiserror::Error;

/// Result type alias for calcpad operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Expression evaluation errors.
    #[error("evaluation error: {0}")]
    Eval(#[from] EvaluateError),

    /// History store errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

/// Errors raised while tokenizing, parsing or evaluating an expression.
///
/// Offsets are character positions in the source text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    /// A character that starts no token.
    #[error("unexpected character '{ch}' at position {offset}")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Character offset.
        offset: usize,
    },

    /// A malformed numeric literal such as `1.2.3` or `0x`.
    #[error("'{text}' is not a valid number")]
    InvalidNumber {
        /// Literal text as written.
        text: String,
        /// Character offset.
        offset: usize,
    },

    /// A token that cannot appear where it was found.
    #[error("did not expect '{found}' at position {offset}")]
    UnexpectedToken {
        /// Token text.
        found: String,
        /// Character offset.
        offset: usize,
    },

    /// Input ended where an operand or closing parenthesis was required.
    #[error("expression ended abruptly")]
    UnexpectedEnd,

    /// An opening parenthesis without a matching `)`.
    #[error("could not find ')' for '(' at position {offset}")]
    UnclosedParen {
        /// Offset of the opening parenthesis.
        offset: usize,
    },

    /// An identifier outside the function table.
    #[error("identifier '{name}' is not defined")]
    UnknownIdentifier {
        /// Identifier as written.
        name: String,
        /// Character offset.
        offset: usize,
    },

    /// A function called with the wrong number of arguments.
    #[error("{function} takes {expected} argument(s), got {found}")]
    Arity {
        /// Function name.
        function: &'static str,
        /// Required argument count.
        expected: usize,
        /// Supplied argument count.
        found: usize,
    },

    /// An argument outside a function's real domain.
    #[error("{function} is undefined for {value}")]
    Domain {
        /// Function name.
        function: &'static str,
        /// Offending argument.
        value: f64,
    },

    /// Division or modulo by zero, or zero raised to a negative power.
    #[error("division by zero")]
    DivisionByZero,

    /// Input nested beyond the parser's depth limit.
    #[error("expression nests too deeply at position {offset}")]
    TooDeep {
        /// Offset of the construct that crossed the limit.
        offset: usize,
    },

    /// A result that is not a finite real number.
    #[error("result is not a finite real number")]
    Overflow,
}

/// The two failures [`Engine::evaluate`](crate::engine::Engine::evaluate)
/// reports. Every evaluator error collapses into one of them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluateError {
    /// The expression divides by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Any other failure; the source carries the positioned detail.
    #[error("invalid expression")]
    InvalidExpression(#[source] ExprError),
}

impl EvaluateError {
    /// Message shown in place of the display text.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::DivisionByZero => "Error: Division by zero",
            Self::InvalidExpression(_) => "Error: Invalid expression",
        }
    }
}

impl From<ExprError> for EvaluateError {
    fn from(err: ExprError) -> Self {
        match err {
            ExprError::DivisionByZero => Self::DivisionByZero,
            other => Self::InvalidExpression(other),
        }
    }
}

/// History store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The history file exists but does not hold a history log.
    #[error("history file is malformed: {path}: {reason}")]
    Malformed {
        /// Path to the history file.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to write file.
    #[error("failed to write file: {path}: {reason}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Directory creation error.
    #[error("failed to create directory: {path}: {reason}")]
    DirectoryFailed {
        /// Path to the directory.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// A gesture word that maps to no key.
    #[error("unknown key: {0}")]
    UnknownKey(String),

    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Missing required argument.
    #[error("missing required argument: {0}")]
    MissingArgument(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(StorageError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_error_display() {
        let err = ExprError::UnexpectedChar { ch: '$', offset: 3 };
        assert_eq!(err.to_string(), "unexpected character '$' at position 3");

        let err = ExprError::Arity {
            function: "sqrt",
            expected: 1,
            found: 2,
        };
        assert_eq!(err.to_string(), "sqrt takes 1 argument(s), got 2");

        let err = ExprError::UnknownIdentifier {
            name: "exit".to_string(),
            offset: 0,
        };
        assert!(err.to_string().contains("exit"));
    }

    #[test]
    fn test_division_by_zero_maps_to_its_own_kind() {
        let err: EvaluateError = ExprError::DivisionByZero.into();
        assert_eq!(err, EvaluateError::DivisionByZero);
        assert_eq!(err.user_message(), "Error: Division by zero");
    }

    #[test]
    fn test_other_errors_map_to_invalid_expression() {
        let err: EvaluateError = ExprError::UnexpectedEnd.into();
        assert!(matches!(
            err,
            EvaluateError::InvalidExpression(ExprError::UnexpectedEnd)
        ));
        assert_eq!(err.user_message(), "Error: Invalid expression");

        let err: EvaluateError = ExprError::Domain {
            function: "factorial",
            value: -1.0,
        }
        .into();
        assert!(matches!(err, EvaluateError::InvalidExpression(_)));

        let err: EvaluateError = ExprError::TooDeep { offset: 256 }.into();
        assert_eq!(err.user_message(), "Error: Invalid expression");
    }

    #[test]
    fn test_evaluate_error_keeps_source() {
        use std::error::Error as _;
        let err = EvaluateError::InvalidExpression(ExprError::UnclosedParen { offset: 4 });
        let source = err.source().map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("could not find ')' for '(' at position 4")
        );
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Malformed {
            path: "/tmp/history.json".to_string(),
            reason: "expected value".to_string(),
        };
        assert!(err.to_string().contains("/tmp/history.json"));
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn test_io_error_variants() {
        let err = IoError::WriteFailed {
            path: "/tmp/out".to_string(),
            reason: "disk full".to_string(),
        };
        assert!(err.to_string().contains("disk full"));

        let err = IoError::DirectoryFailed {
            path: "/tmp/dir".to_string(),
            reason: "exists".to_string(),
        };
        assert!(err.to_string().contains("directory"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_command() {
        let err: Error = CommandError::UnknownKey("sinh".to_string()).into();
        assert!(matches!(err, Error::Command(_)));
        assert_eq!(err.to_string(), "command error: unknown key: sinh");
    }

    #[test]
    fn test_from_serde_json_error_to_storage_error() {
        let json_err: serde_json::Error = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: StorageError = json_err.into();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
