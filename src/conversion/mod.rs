//! Unit conversion module
//!
//! Categories of units, their linear or affine conversion strategies, and the
//! helpers that sit between a converter form and the engine.

pub mod catalog;
pub mod request;
pub mod units;

pub use catalog::{
    Catalog, ConfigError, ConversionError, ConversionResult, CELSIUS, FAHRENHEIT, KELVIN,
};
pub use request::{format_result, parse_input, ConversionRequest, MAX_FRACTION_DIGITS};
pub use units::{AffineRule, AffineTransform, ConversionCategory, ConversionStrategy, Unit};

/// Convert `value` between two units of `category`; NaN for unknown units
pub fn convert(category: &ConversionCategory, value: f64, from: &str, to: &str) -> f64 {
    category.convert(value, from, to)
}
