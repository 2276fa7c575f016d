//! Number formatting for G-code output
//!
//! Coordinates, heights and extrusion totals are written without a fixed
//! width or precision. Two styles are supported:
//! - `Compat`: six significant digits with trailing zeros removed, switching
//!   to scientific notation for very small or very large magnitudes. Legacy
//!   firmware test prints were produced with this style.
//! - `Shortest`: the shortest text that parses back to the same `f64`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Significant digits used by [`NumberFormat::Compat`]
pub const COMPAT_PRECISION: usize = 6;

/// Number formatting style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    /// Six significant digits, `%g` style
    Compat,
    /// Shortest round-trip representation
    Shortest,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::Compat
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compat => write!(f, "compat"),
            Self::Shortest => write!(f, "shortest"),
        }
    }
}

impl FromStr for NumberFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compat" | "g" => Ok(Self::Compat),
            "shortest" | "roundtrip" => Ok(Self::Shortest),
            _ => Err(format!("Unknown number format: {}", s)),
        }
    }
}

/// Format a value for a G-code word
pub fn format_number(value: f64, style: NumberFormat) -> String {
    match style {
        NumberFormat::Compat => format_significant(value, COMPAT_PRECISION),
        NumberFormat::Shortest => format!("{}", value),
    }
}

/// Format with `precision` significant digits, `%g` style
fn format_significant(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);

    // Rounded to the requested digits first so the exponent accounts for carries (9.999995 -> 10)
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Drop trailing fractional zeros and a dangling decimal point
fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(value: f64) -> String {
        format_number(value, NumberFormat::Compat)
    }

    #[test]
    fn test_compat_integers() {
        assert_eq!(g(10.0), "10");
        assert_eq!(g(82.0), "82");
        assert_eq!(g(-33.0), "-33");
        assert_eq!(g(0.0), "0");
        assert_eq!(g(123456.0), "123456");
    }

    #[test]
    fn test_compat_fractions() {
        assert_eq!(g(0.2), "0.2");
        assert_eq!(g(0.1 + 0.2), "0.3");
        assert_eq!(g(0.6000000000000001), "0.6");
        assert_eq!(g(1.0 / 3.0), "0.333333");
        assert_eq!(g(2.0 / 3.0), "0.666667");
        assert_eq!(g(12.345678), "12.3457");
        assert_eq!(g(0.0001), "0.0001");
    }

    #[test]
    fn test_compat_scientific() {
        assert_eq!(g(1234567.0), "1.23457e+06");
        assert_eq!(g(1_000_000.0), "1e+06");
        assert_eq!(g(0.00001), "1e-05");
        assert_eq!(g(-0.000012345), "-1.2345e-05");
    }

    #[test]
    fn test_compat_rounding_carry() {
        assert_eq!(g(9.9999996), "10");
        assert_eq!(g(999999.6), "1e+06");
    }

    #[test]
    fn test_shortest() {
        assert_eq!(format_number(0.6000000000000001, NumberFormat::Shortest), "0.6000000000000001");
        assert_eq!(format_number(82.0, NumberFormat::Shortest), "82");
    }

    #[test]
    fn test_number_format_parse() {
        assert_eq!("compat".parse::<NumberFormat>().unwrap(), NumberFormat::Compat);
        assert_eq!("Shortest".parse::<NumberFormat>().unwrap(), NumberFormat::Shortest);
        assert!("fixed".parse::<NumberFormat>().is_err());
        assert_eq!(NumberFormat::default(), NumberFormat::Compat);
    }
}
