//! Converter input and output handling
//!
//! Parsing of the free-text input field and display formatting of results.

use serde::{Deserialize, Serialize};

use super::catalog::{Catalog, ConversionResult};

/// Maximum fraction digits shown for a result
pub const MAX_FRACTION_DIGITS: usize = 5;

/// A conversion as selected in the converter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub category: String,
    pub value: f64,
    pub from: String,
    pub to: String,
}

impl ConversionRequest {
    pub fn new(
        category: impl Into<String>,
        value: f64,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            value,
            from: from.into(),
            to: to.into(),
        }
    }

    /// Same request with the two units exchanged
    pub fn swapped(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            ..self
        }
    }

    pub fn evaluate(&self, catalog: &Catalog) -> ConversionResult<f64> {
        catalog.convert(&self.category, self.value, &self.from, &self.to)
    }
}

/// Parse the leading number of an input field.
///
/// Leading whitespace is skipped and anything after the numeric prefix is
/// ignored, so "12.5 kg" reads as 12.5. Returns `None` if no digits lead.
pub fn parse_input(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Format a result for display.
///
/// Returns `None` for the NaN sentinel (and infinities) so the caller shows an
/// empty field. Otherwise at most five fraction digits, no grouping, and no
/// trailing zeros.
pub fn format_result(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }

    let mut text = format!("{:.*}", MAX_FRACTION_DIGITS, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::catalog::ConversionError;

    #[test]
    fn test_parse_input_plain_numbers() {
        assert_eq!(parse_input("42"), Some(42.0));
        assert_eq!(parse_input("  -3.5"), Some(-3.5));
        assert_eq!(parse_input("+7"), Some(7.0));
        assert_eq!(parse_input(".25"), Some(0.25));
        assert_eq!(parse_input("5."), Some(5.0));
        assert_eq!(parse_input("1.5e3"), Some(1500.0));
        assert_eq!(parse_input("2E-2"), Some(0.02));
    }

    #[test]
    fn test_parse_input_ignores_trailing_text() {
        assert_eq!(parse_input("12.5 kg"), Some(12.5));
        assert_eq!(parse_input("3e"), Some(3.0));
        assert_eq!(parse_input("3e+"), Some(3.0));
        assert_eq!(parse_input("1.2.3"), Some(1.2));
    }

    #[test]
    fn test_parse_input_rejects_non_numbers() {
        assert_eq!(parse_input(""), None);
        assert_eq!(parse_input("   "), None);
        assert_eq!(parse_input("abc"), None);
        assert_eq!(parse_input("-"), None);
        assert_eq!(parse_input("."), None);
        assert_eq!(parse_input("-.e5"), None);
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(32.0).as_deref(), Some("32"));
        assert_eq!(format_result(-17.777777777).as_deref(), Some("-17.77778"));
        assert_eq!(format_result(0.1 + 0.2).as_deref(), Some("0.3"));
        assert_eq!(format_result(1234567.0).as_deref(), Some("1234567"));
        assert_eq!(format_result(0.000001).as_deref(), Some("0"));
        assert_eq!(format_result(-0.000001).as_deref(), Some("0"));
        assert_eq!(format_result(2.5).as_deref(), Some("2.5"));
    }

    #[test]
    fn test_format_result_sentinel() {
        assert_eq!(format_result(f64::NAN), None);
        assert_eq!(format_result(f64::INFINITY), None);
    }

    #[test]
    fn test_swapped() {
        let request = ConversionRequest::new("Length", 3.0, "m", "ft").swapped();
        assert_eq!(request.from, "ft");
        assert_eq!(request.to, "m");
        assert_eq!(request.value, 3.0);
        assert_eq!(request.category, "Length");
    }

    #[test]
    fn test_evaluate() {
        let catalog = Catalog::builtin();

        let request = ConversionRequest::new("Time", 1.0, "wk", "d");
        assert_eq!(request.evaluate(&catalog), Ok(7.0));
        assert_eq!(request.swapped().evaluate(&catalog).map(format_result), Ok(Some("0.14286".to_string())));

        let unknown = ConversionRequest::new("Money", 1.0, "USD", "EUR");
        assert_eq!(
            unknown.evaluate(&catalog),
            Err(ConversionError::UnknownCategory("Money".to_string()))
        );
    }
}
