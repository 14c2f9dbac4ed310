//! Sandboxed arithmetic evaluator.
//!
//! Source text is tokenized, parsed into an [`Expr`] tree and walked.
//! Only the operators in [`BinaryOp`]/[`UnaryOp`] and the functions in
//! [`Function`] exist; there is no other name an expression can reach.

pub mod ast;
pub mod eval;
pub mod functions;
pub mod lexer;
pub mod parser;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use eval::evaluate;
pub use functions::Function;
pub use lexer::{Token, TokenKind, tokenize};
pub use parser::parse;

use crate::error::ExprError;

/// Parses and evaluates `source` in one step.
///
/// # Errors
///
/// Returns the first tokenizer, parser or evaluation error.
///
/// # Examples
///
/// ```
/// use calcpad::expr::evaluate_str;
///
/// assert_eq!(evaluate_str("(3 + 4) ^ 2").unwrap(), 49.0);
/// ```
pub fn evaluate_str(source: &str) -> Result<f64, ExprError> {
    evaluate(&parse(source)?)
}
