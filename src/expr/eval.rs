//! Tree-walking evaluator.

use crate::error::ExprError;
use crate::expr::ast::{BinaryOp, Expr};

/// Evaluates an expression tree to a finite `f64`.
///
/// # Errors
///
/// Returns [`ExprError::DivisionByZero`] for `x / 0`, `x % 0` and `0 ^ -n`,
/// [`ExprError::Domain`] for arguments outside a function's real domain
/// (including non-real powers such as `(-8) ^ 0.5`), and
/// [`ExprError::Overflow`] when an intermediate result is not finite.
pub fn evaluate(expr: &Expr) -> Result<f64, ExprError> {
    let value = match expr {
        Expr::Number(value) => *value,
        Expr::Unary { op, operand } => op.apply(evaluate(operand)?),
        Expr::Binary { op, left, right } => apply_binary(*op, evaluate(left)?, evaluate(right)?)?,
        Expr::Call { function, args } => {
            let [arg] = args.as_slice() else {
                return Err(ExprError::Arity {
                    function: function.name(),
                    expected: function.arity(),
                    found: args.len(),
                });
            };
            function.apply(evaluate(arg)?)?
        }
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(ExprError::Overflow)
    }
}

fn apply_binary(op: BinaryOp, left: f64, right: f64) -> Result<f64, ExprError> {
    match op {
        BinaryOp::Add => Ok(left + right),
        BinaryOp::Sub => Ok(left - right),
        BinaryOp::Mul => Ok(left * right),
        BinaryOp::Div if right == 0.0 => Err(ExprError::DivisionByZero),
        BinaryOp::Div => Ok(left / right),
        BinaryOp::Rem if right == 0.0 => Err(ExprError::DivisionByZero),
        BinaryOp::Rem => Ok(floored_rem(left, right)),
        BinaryOp::Pow if left == 0.0 && right < 0.0 => Err(ExprError::DivisionByZero),
        BinaryOp::Pow => {
            let value = left.powf(right);
            if value.is_nan() {
                Err(ExprError::Domain {
                    function: "^",
                    value: left,
                })
            } else {
                Ok(value)
            }
        }
    }
}

/// Remainder carrying the sign of the divisor, so `-7 % 3 == 2`.
fn floored_rem(left: f64, right: f64) -> f64 {
    let rem = left % right;
    if rem != 0.0 && (rem < 0.0) != (right < 0.0) {
        rem + right
    } else {
        rem
    }
}
