//! The function table.
//!
//! This enum is the whole of what an expression can call. Identifiers
//! that do not resolve here are rejected by the parser.

use crate::error::ExprError;
use std::str::FromStr;

/// Largest `n` whose factorial is finite in `f64`.
pub const MAX_FACTORIAL: f64 = 170.0;

/// Functions reachable from an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// Square root.
    Sqrt,
    /// Sine (radians).
    Sin,
    /// Cosine (radians).
    Cos,
    /// Tangent (radians).
    Tan,
    /// Base-10 logarithm.
    Log10,
    /// Natural logarithm, spelled `log` or `ln`.
    Ln,
    /// Factorial of a non-negative integer.
    Factorial,
    /// Real cube root.
    Cbrt,
}

impl Function {
    /// Every callable function, in keypad order.
    pub const ALL: [Self; 8] = [
        Self::Sqrt,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Log10,
        Self::Ln,
        Self::Factorial,
        Self::Cbrt,
    ];

    /// Canonical name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log10 => "log10",
            Self::Ln => "log",
            Self::Factorial => "factorial",
            Self::Cbrt => "cbrt",
        }
    }

    /// Number of arguments the function takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        1
    }

    /// Applies the function to its argument.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::Domain`] when the argument lies outside the
    /// function's real domain and [`ExprError::Overflow`] when the result
    /// does not fit in an `f64`.
    pub fn apply(self, x: f64) -> Result<f64, ExprError> {
        let domain = || ExprError::Domain {
            function: self.name(),
            value: x,
        };

        match self {
            Self::Sqrt if x < 0.0 => Err(domain()),
            Self::Sqrt => Ok(x.sqrt()),
            Self::Sin => Ok(x.sin()),
            Self::Cos => Ok(x.cos()),
            Self::Tan => Ok(x.tan()),
            Self::Log10 | Self::Ln if x <= 0.0 => Err(domain()),
            Self::Log10 => Ok(x.log10()),
            Self::Ln => Ok(x.ln()),
            Self::Factorial if x < 0.0 || x.fract() != 0.0 => Err(domain()),
            Self::Factorial if x > MAX_FACTORIAL => Err(ExprError::Overflow),
            Self::Factorial => Ok(factorial(x)),
            Self::Cbrt => Ok(x.cbrt()),
        }
    }
}

impl FromStr for Function {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sqrt" => Ok(Self::Sqrt),
            "sin" => Ok(Self::Sin),
            "cos" => Ok(Self::Cos),
            "tan" => Ok(Self::Tan),
            "log10" => Ok(Self::Log10),
            "log" | "ln" => Ok(Self::Ln),
            "factorial" => Ok(Self::Factorial),
            "cbrt" => Ok(Self::Cbrt),
            _ => Err(()),
        }
    }
}

/// Product `1 * 2 * ... * n` for an integral `n` in `0..=170`.
fn factorial(n: f64) -> f64 {
    let mut product = 1.0;
    let mut k = 2.0;
    while k <= n {
        product *= k;
        k += 1.0;
    }
    product
}
