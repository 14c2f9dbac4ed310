//! Keypad vocabulary: the operators, functions and constants a
//! presentation layer can hand to the engine.

use std::fmt;
use std::str::FromStr;

/// Binary operator keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `×`
    Multiply,
    /// `÷`
    Divide,
    /// `%`
    Modulo,
    /// `^`
    Power,
}

impl Operator {
    /// Every operator key.
    pub const ALL: [Self; 6] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Modulo,
        Self::Power,
    ];

    /// Symbol written into the buffer.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Modulo => "%",
            Self::Power => "^",
        }
    }

    /// The symbol with single-space padding, as it appears in the buffer.
    #[must_use]
    pub fn padded(self) -> String {
        format!(" {} ", self.symbol())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ();

    /// Accepts both keypad symbols and their ASCII spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Add),
            "-" | "−" => Ok(Self::Subtract),
            "*" | "×" => Ok(Self::Multiply),
            "/" | "÷" => Ok(Self::Divide),
            "%" | "mod" => Ok(Self::Modulo),
            "^" | "**" => Ok(Self::Power),
            _ => Err(()),
        }
    }
}

/// Function keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKey {
    /// `sqrt(`
    Sqrt,
    /// `sin(`
    Sin,
    /// `cos(`
    Cos,
    /// `tan(`
    Tan,
    /// `log10(`
    Log10,
    /// `ln(`
    Ln,
    /// `factorial(`
    Factorial,
    /// `cbrt(`
    Cbrt,
    /// Wraps the buffer as `(B)^2`.
    Square,
    /// Wraps the buffer as `(B)^3`.
    Cube,
    /// Wraps the buffer as `1÷(B)`.
    Reciprocal,
}

/// How a function key edits the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionShape {
    /// Appends `name(`; the user supplies argument and `)`.
    Prefix(&'static str),
    /// Replaces the whole buffer `B` with `before + B + after`.
    Wrap {
        /// Text placed before the buffer.
        before: &'static str,
        /// Text placed after the buffer.
        after: &'static str,
    },
}

impl FunctionKey {
    /// Every function key.
    pub const ALL: [Self; 11] = [
        Self::Sqrt,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Log10,
        Self::Ln,
        Self::Factorial,
        Self::Cbrt,
        Self::Square,
        Self::Cube,
        Self::Reciprocal,
    ];

    /// Key name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log10 => "log10",
            Self::Ln => "ln",
            Self::Factorial => "factorial",
            Self::Cbrt => "cbrt",
            Self::Square => "square",
            Self::Cube => "cube",
            Self::Reciprocal => "reciprocal",
        }
    }

    /// Buffer edit performed by the key.
    #[must_use]
    pub const fn shape(self) -> FunctionShape {
        match self {
            Self::Square => FunctionShape::Wrap {
                before: "(",
                after: ")^2",
            },
            Self::Cube => FunctionShape::Wrap {
                before: "(",
                after: ")^3",
            },
            Self::Reciprocal => FunctionShape::Wrap {
                before: "1÷(",
                after: ")",
            },
            prefix => FunctionShape::Prefix(prefix.name()),
        }
    }
}

impl fmt::Display for FunctionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FunctionKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sqrt" | "√" => Ok(Self::Sqrt),
            "sin" => Ok(Self::Sin),
            "cos" => Ok(Self::Cos),
            "tan" => Ok(Self::Tan),
            "log10" => Ok(Self::Log10),
            "ln" => Ok(Self::Ln),
            "factorial" | "n!" | "x!" => Ok(Self::Factorial),
            "cbrt" | "∛" => Ok(Self::Cbrt),
            "square" | "x2" | "x²" => Ok(Self::Square),
            "cube" | "x3" | "x³" => Ok(Self::Cube),
            "reciprocal" | "1/x" => Ok(Self::Reciprocal),
            _ => Err(()),
        }
    }
}

/// Constant keys. Pressing one appends the constant's decimal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    /// π
    Pi,
    /// Euler's number.
    E,
}

impl Constant {
    /// Numeric value.
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }

    /// Text appended to the buffer (shortest round-trip decimal).
    #[must_use]
    pub fn text(self) -> String {
        self.value().to_string()
    }
}

impl FromStr for Constant {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pi" | "π" => Ok(Self::Pi),
            "e" => Ok(Self::E),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_padding() {
        assert_eq!(Operator::Multiply.padded(), " × ");
        assert_eq!(Operator::Subtract.padded(), " - ");
    }

    #[test]
    fn test_operator_from_ascii_and_symbol() {
        assert_eq!("*".parse(), Ok(Operator::Multiply));
        assert_eq!("×".parse(), Ok(Operator::Multiply));
        assert_eq!("÷".parse(), Ok(Operator::Divide));
        assert_eq!("**".parse(), Ok(Operator::Power));
        assert_eq!("&".parse::<Operator>(), Err(()));
        for op in Operator::ALL {
            assert_eq!(op.symbol().parse(), Ok(op));
        }
    }

    #[test]
    fn test_function_shapes() {
        assert_eq!(FunctionKey::Sqrt.shape(), FunctionShape::Prefix("sqrt"));
        assert_eq!(FunctionKey::Ln.shape(), FunctionShape::Prefix("ln"));
        assert_eq!(
            FunctionKey::Square.shape(),
            FunctionShape::Wrap {
                before: "(",
                after: ")^2"
            }
        );
        for key in FunctionKey::ALL {
            assert_eq!(key.name().parse(), Ok(key));
        }
    }

    #[test]
    fn test_prefix_names_exist_in_function_table() {
        for key in FunctionKey::ALL {
            if let FunctionShape::Prefix(name) = key.shape() {
                assert!(
                    name.parse::<crate::expr::Function>().is_ok(),
                    "{name} missing from the function table"
                );
            }
        }
    }

    #[test]
    fn test_constant_text_round_trips() {
        assert_eq!(Constant::Pi.text().parse::<f64>(), Ok(std::f64::consts::PI));
        assert_eq!("π".parse(), Ok(Constant::Pi));
    }
}
