//! Result formatting and base rendering.
//!
//! Every number that reaches the buffer (evaluation results, memory
//! recall, base conversion) goes through this module, so what the user
//! sees can always be fed back through the evaluator.

use crate::error::ExprError;
use std::fmt;
use std::str::FromStr;

/// Decimal places kept in non-integral results.
pub const DECIMAL_PLACES: i32 = 10;

/// Magnitude beyond which scaling by `10^DECIMAL_PLACES` loses the
/// integer part; such values have no fractional digits left anyway.
const ROUNDING_LIMIT: f64 = 1e15;

/// Rounds to [`DECIMAL_PLACES`] places.
#[must_use]
pub fn round_decimal(value: f64) -> f64 {
    if value.abs() >= ROUNDING_LIMIT {
        return value;
    }
    let scale = 10f64.powi(DECIMAL_PLACES);
    (value * scale).round() / scale
}

/// Formats a result for the buffer.
///
/// Integral values print without a fractional part; everything else is
/// rounded to [`DECIMAL_PLACES`] places first, and a value that rounds to
/// an integer prints as that integer.
///
/// # Examples
///
/// ```
/// use calcpad::core::format_number;
///
/// assert_eq!(format_number(5.0), "5");
/// assert_eq!(format_number(0.1 + 0.2), "0.3");
/// assert_eq!(format_number(2.0_f64.sqrt()), "1.4142135624");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    let rounded = round_decimal(value);
    if rounded == 0.0 {
        // Also folds -0 into 0.
        return "0".to_string();
    }
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded}")
    }
}

/// Target bases for base conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    /// Base 16, `0x` prefix.
    Hex,
    /// Base 2, `0b` prefix.
    Bin,
    /// Base 8, `0o` prefix.
    Oct,
    /// Base 10, no prefix.
    Dec,
}

impl Base {
    /// Every base, in keypad order.
    pub const ALL: [Self; 4] = [Self::Hex, Self::Bin, Self::Oct, Self::Dec];

    /// Keypad label.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Bin => "bin",
            Self::Oct => "oct",
            Self::Dec => "dec",
        }
    }

    /// Renders `value` truncated toward zero, with the base's literal
    /// prefix after any sign (`-0xff`).
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::Overflow`] when the truncated value does not
    /// fit in an `i128`.
    ///
    /// # Examples
    ///
    /// ```
    /// use calcpad::core::Base;
    ///
    /// assert_eq!(Base::Hex.render(255.9).unwrap(), "0xff");
    /// assert_eq!(Base::Bin.render(-5.0).unwrap(), "-0b101");
    /// ```
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn render(self, value: f64) -> Result<String, ExprError> {
        let truncated = value.trunc();
        if !truncated.is_finite() || truncated.abs() >= i128::MAX as f64 {
            return Err(ExprError::Overflow);
        }
        let integer = truncated as i128;
        let sign = if integer < 0 { "-" } else { "" };
        let magnitude = integer.unsigned_abs();

        Ok(match self {
            Self::Hex => format!("{sign}0x{magnitude:x}"),
            Self::Bin => format!("{sign}0b{magnitude:b}"),
            Self::Oct => format!("{sign}0o{magnitude:o}"),
            Self::Dec => format!("{sign}{magnitude}"),
        })
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Base {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "bin" => Ok(Self::Bin),
            "oct" => Ok(Self::Oct),
            "dec" => Ok(Self::Dec),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_values_drop_fraction() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_rounds_to_ten_places() {
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
        assert_eq!(format_number(2.0 / 3.0), "0.6666666667");
        assert_eq!(format_number(0.5), "0.5");
    }

    #[test]
    fn test_values_rounding_to_integers_print_as_integers() {
        assert_eq!(format_number(2.000_000_000_000_000_4), "2");
        assert_eq!(format_number(0.999_999_999_999_9), "1");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-1e-12), "0");
    }

    #[test]
    fn test_formatted_output_never_uses_exponent() {
        let text = format_number(1.5e-7);
        assert_eq!(text, "0.00000015");
        assert!(!format_number(1e300).contains('e'));
    }

    #[test]
    fn test_render_bases() {
        assert_eq!(Base::Hex.render(255.0), Ok("0xff".to_string()));
        assert_eq!(Base::Bin.render(10.0), Ok("0b1010".to_string()));
        assert_eq!(Base::Oct.render(8.0), Ok("0o10".to_string()));
        assert_eq!(Base::Dec.render(42.7), Ok("42".to_string()));
        assert_eq!(Base::Dec.render(-42.7), Ok("-42".to_string()));
        assert_eq!(Base::Hex.render(0.0), Ok("0x0".to_string()));
    }

    #[test]
    fn test_render_out_of_range() {
        assert_eq!(Base::Hex.render(1e40), Err(ExprError::Overflow));
    }

    #[test]
    fn test_base_from_str() {
        for base in Base::ALL {
            assert_eq!(base.name().parse(), Ok(base));
        }
        assert_eq!("HEX".parse(), Ok(Base::Hex));
        assert_eq!("base64".parse::<Base>(), Err(()));
    }
}
