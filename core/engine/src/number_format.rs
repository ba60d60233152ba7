//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Number formatting utilities for hover labels and KPI values.
//! CONTEXT: This module converts raw metric values to display strings,
//! e.g. `-3000.0` with two decimals and separators becomes `-3,000.00`.

use serde::{Deserialize, Serialize};

/// Display format for a numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum NumberFormat {
    /// Shortest representation; integers are grouped, e.g. `1,200`.
    #[default]
    General,
    /// Fixed decimals, as in the `{:,.2f}` style.
    Number {
        decimal_places: u8,
        use_thousands_separator: bool,
    },
}

/// Format a number according to the specified format.
pub fn format_number(value: f64, format: &NumberFormat) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    match format {
        NumberFormat::General => format_general(value),
        NumberFormat::Number {
            decimal_places,
            use_thousands_separator,
        } => format_decimal(value, *decimal_places, *use_thousands_separator),
    }
}

/// Shorthand for the `{:,.N}` style: thousands separators and fixed decimals.
pub fn format_with_separators(value: f64, decimal_places: u8) -> String {
    format_number(
        value,
        &NumberFormat::Number {
            decimal_places,
            use_thousands_separator: true,
        },
    )
}

/// Format a number in general format (auto-detect best representation).
fn format_general(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let abs_value = value.abs();

    if abs_value >= 1e10 || abs_value < 1e-4 {
        return format!("{:.5e}", value);
    }

    // Integers keep grouping but no decimal point
    if value.fract() == 0.0 {
        return add_thousands_separator(&format!("{:.0}", value));
    }

    let formatted = format!("{:.10}", value);
    add_thousands_separator(formatted.trim_end_matches('0').trim_end_matches('.'))
}

/// Format a number with specified decimal places and optional thousands separator.
fn format_decimal(value: f64, decimal_places: u8, use_thousands_separator: bool) -> String {
    let rounded = format!("{:.prec$}", value, prec = decimal_places as usize);

    if use_thousands_separator {
        add_thousands_separator(&rounded)
    } else {
        rounded
    }
}

/// Add thousands separators to a numeric string.
fn add_thousands_separator(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (s, None),
    };

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::with_capacity(s.len() + digits.len() / 3 + 1);
    if negative {
        result.push('-');
    }

    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(1234.567, 2, false), "1234.57");
        assert_eq!(format_decimal(1234.567, 2, true), "1,234.57");
        assert_eq!(format_decimal(1000000.0, 0, true), "1,000,000");
    }

    #[test]
    fn test_format_with_separators() {
        assert_eq!(format_with_separators(-3000.0, 2), "-3,000.00");
        assert_eq!(format_with_separators(50.0, 2), "50.00");
        assert_eq!(format_with_separators(0.0, 2), "0.00");
        assert_eq!(format_with_separators(1234567.891, 2), "1,234,567.89");
    }

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(1200.0), "1,200");
        assert_eq!(format_general(3.25), "3.25");
    }

    #[test]
    fn test_default_is_general() {
        assert_eq!(format_number(1200.0, &NumberFormat::default()), "1,200");
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert_eq!(format_with_separators(f64::NAN, 2), "NaN");
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(add_thousands_separator("1234567"), "1,234,567");
        assert_eq!(add_thousands_separator("123"), "123");
        assert_eq!(add_thousands_separator("-1234.56"), "-1,234.56");
    }
}
