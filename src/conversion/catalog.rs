//! Category catalog
//!
//! The set of configured categories, looked up by name. The built-in catalog
//! carries the factor tables for every category the converter ships with.

use std::collections::HashSet;

use thiserror::Error;

use super::units::{AffineRule, AffineTransform, ConversionCategory, ConversionStrategy, Unit};

/// Invalid category configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Duplicate category name: {0}")]
    DuplicateCategory(String),

    #[error("Category '{0}' has no units")]
    NoUnits(String),

    #[error("Category '{category}' lists unit '{symbol}' more than once")]
    DuplicateUnit { category: String, symbol: String },

    #[error("Category '{category}' has no factor for unit '{symbol}'")]
    MissingFactor { category: String, symbol: String },

    #[error("Category '{category}' has invalid factor {factor} for unit '{symbol}'")]
    InvalidFactor {
        category: String,
        symbol: String,
        factor: f64,
    },

    #[error("Category '{category}' must have exactly one base unit, found {count}")]
    BaseUnitCount { category: String, count: usize },

    #[error("Category '{category}' references unknown unit '{symbol}'")]
    UnlistedSymbol { category: String, symbol: String },

    #[error("Category '{category}' defines {from} -> {to} more than once")]
    DuplicateRule {
        category: String,
        from: String,
        to: String,
    },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Caller errors when converting through a catalog
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

pub type ConversionResult<T> = Result<T, ConversionError>;

// ============================================================================
// Built-in factor tables: (display name, symbol, factor to base unit)
// ============================================================================

/// Base unit: meter
const LENGTH_UNITS: &[(&str, &str, f64)] = &[
    ("Meters", "m", 1.0),
    ("Kilometers", "km", 1000.0),
    ("Centimeters", "cm", 0.01),
    ("Millimeters", "mm", 0.001),
    ("Miles", "mi", 1609.34),
    ("Yards", "yd", 0.9144),
    ("Feet", "ft", 0.3048),
    ("Inches", "in", 0.0254),
];

/// Base unit: kilogram
const WEIGHT_UNITS: &[(&str, &str, f64)] = &[
    ("Kilograms", "kg", 1.0),
    ("Grams", "g", 0.001),
    ("Milligrams", "mg", 1e-6),
    ("Metric Tonnes", "t", 1000.0),
    ("Pounds", "lb", 0.453592),
    ("Ounces", "oz", 0.0283495),
];

/// Base unit: byte, binary multiples
const DATA_UNITS: &[(&str, &str, f64)] = &[
    ("Bytes", "B", 1.0),
    ("Kilobytes", "KB", 1024.0),
    ("Megabytes", "MB", 1_048_576.0),
    ("Gigabytes", "GB", 1_073_741_824.0),
    ("Terabytes", "TB", 1_099_511_627_776.0),
];

/// Base unit: second
const TIME_UNITS: &[(&str, &str, f64)] = &[
    ("Seconds", "s", 1.0),
    ("Minutes", "min", 60.0),
    ("Hours", "h", 3600.0),
    ("Days", "d", 86400.0),
    ("Weeks", "wk", 604800.0),
];

/// Base unit: meter per second
const SPEED_UNITS: &[(&str, &str, f64)] = &[
    ("Meters/second", "m/s", 1.0),
    ("Kilometers/hour", "km/h", 1.0 / 3.6),
    ("Miles/hour", "mph", 0.44704),
];

/// Base unit: square meter
const AREA_UNITS: &[(&str, &str, f64)] = &[
    ("Square Meters", "m²", 1.0),
    ("Square Kilometers", "km²", 1e6),
    ("Hectares", "ha", 10000.0),
    ("Acres", "acre", 4046.86),
    ("Square Feet", "ft²", 0.092903),
    ("Square Inches", "in²", 0.00064516),
];

/// Base unit: liter
const VOLUME_UNITS: &[(&str, &str, f64)] = &[
    ("Liters", "L", 1.0),
    ("Milliliters", "mL", 0.001),
    ("US Gallons", "gal", 3.78541),
    ("US Quarts", "qt", 0.946353),
    ("US Pints", "pt", 0.473176),
    ("US Fluid Ounces", "fl-oz", 0.0295735),
];

// ============================================================================
// Temperature
// ============================================================================

pub const CELSIUS: &str = "°C";
pub const FAHRENHEIT: &str = "°F";
pub const KELVIN: &str = "K";

/// Kelvin offset of 0 °C
const KELVIN_OFFSET: f64 = 273.15;

const TEMPERATURE_RULES: &[(&str, &str, AffineTransform)] = &[
    (CELSIUS, FAHRENHEIT, AffineTransform::new(0.0, 9.0 / 5.0, 32.0)),
    (CELSIUS, KELVIN, AffineTransform::new(0.0, 1.0, KELVIN_OFFSET)),
    (FAHRENHEIT, CELSIUS, AffineTransform::new(-32.0, 5.0 / 9.0, 0.0)),
    (FAHRENHEIT, KELVIN, AffineTransform::new(-32.0, 5.0 / 9.0, KELVIN_OFFSET)),
    (KELVIN, CELSIUS, AffineTransform::new(-KELVIN_OFFSET, 1.0, 0.0)),
    (KELVIN, FAHRENHEIT, AffineTransform::new(-KELVIN_OFFSET, 9.0 / 5.0, 32.0)),
];

fn temperature() -> ConversionCategory {
    ConversionCategory::new(
        "Temperature",
        vec![
            Unit::new("Celsius", CELSIUS),
            Unit::new("Fahrenheit", FAHRENHEIT),
            Unit::new("Kelvin", KELVIN),
        ],
        ConversionStrategy::Affine {
            rules: TEMPERATURE_RULES
                .iter()
                .map(|(from, to, transform)| AffineRule {
                    from: from.to_string(),
                    to: to.to_string(),
                    transform: *transform,
                })
                .collect(),
        },
    )
}

/// An immutable, validated set of categories
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<ConversionCategory>,
}

impl Catalog {
    /// Validate and wrap a list of categories, keeping their order
    pub fn new(categories: Vec<ConversionCategory>) -> Result<Self, ConfigError> {
        let mut names = HashSet::new();
        for category in &categories {
            if !names.insert(category.name.as_str()) {
                return Err(ConfigError::DuplicateCategory(category.name.clone()));
            }
            category.validate()?;
        }
        Ok(Self { categories })
    }

    /// Load a catalog from a JSON array of categories
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let categories: Vec<ConversionCategory> = serde_json::from_str(json)?;
        let catalog = Self::new(categories)?;
        tracing::info!("Loaded catalog with {} categories", catalog.categories.len());
        Ok(catalog)
    }

    /// The categories the converter ships with
    pub fn builtin() -> Self {
        Self {
            categories: vec![
                ConversionCategory::linear("Length", LENGTH_UNITS),
                ConversionCategory::linear("Weight", WEIGHT_UNITS),
                temperature(),
                ConversionCategory::linear("Data Storage", DATA_UNITS),
                ConversionCategory::linear("Time", TIME_UNITS),
                ConversionCategory::linear("Speed", SPEED_UNITS),
                ConversionCategory::linear("Area", AREA_UNITS),
                ConversionCategory::linear("Volume", VOLUME_UNITS),
            ],
        }
    }

    pub fn categories(&self) -> &[ConversionCategory] {
        &self.categories
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn category(&self, name: &str) -> ConversionResult<&ConversionCategory> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ConversionError::UnknownCategory(name.to_string()))
    }

    /// Convert within a named category.
    ///
    /// An unknown category is an error; an unknown unit inside a known
    /// category is `Ok(NaN)`.
    pub fn convert(&self, category: &str, value: f64, from: &str, to: &str) -> ConversionResult<f64> {
        let result = self.category(category)?.convert(value, from, to);
        if result.is_nan() {
            tracing::debug!("No {} conversion for '{}' -> '{}'", category, from, to);
        }
        Ok(result)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
