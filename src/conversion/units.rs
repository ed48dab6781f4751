//! Unit types and conversion strategies
//!
//! A category owns its units plus one strategy that knows how to move a value
//! between any two of them.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::catalog::ConfigError;

/// A measurement unit within a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Display label (e.g., "Meters")
    pub name: String,
    /// Key that identifies the unit within its category (e.g., "m")
    pub symbol: String,
}

impl Unit {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
        }
    }
}

/// Affine transform of the form `(value + shift) * scale + offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    #[serde(default)]
    pub shift: f64,
    pub scale: f64,
    #[serde(default)]
    pub offset: f64,
}

impl AffineTransform {
    pub const fn new(shift: f64, scale: f64, offset: f64) -> Self {
        Self { shift, scale, offset }
    }

    pub fn apply(&self, value: f64) -> f64 {
        (value + self.shift) * self.scale + self.offset
    }
}

/// One explicit entry of an affine conversion table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffineRule {
    pub from: String,
    pub to: String,
    pub transform: AffineTransform,
}

/// How values move between the units of a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ConversionStrategy {
    /// Ratio conversion through an implicit base unit (factor 1)
    Linear { factors: BTreeMap<String, f64> },
    /// Explicit per-pair affine functions; no inverse is ever derived
    Affine { rules: Vec<AffineRule> },
}

impl ConversionStrategy {
    /// Convert `value` from one unit symbol to another.
    ///
    /// Unknown symbols and unsupported pairs yield `f64::NAN` rather than an
    /// error so callers can render an empty result.
    pub fn convert(&self, value: f64, from: &str, to: &str) -> f64 {
        match self {
            ConversionStrategy::Linear { factors } => {
                let (Some(from_factor), Some(to_factor)) = (factors.get(from), factors.get(to))
                else {
                    return f64::NAN;
                };
                // value * f / f is not always bit-exact
                if from == to {
                    return value;
                }
                let value_in_base = value * from_factor;
                value_in_base / to_factor
            }
            ConversionStrategy::Affine { rules } => {
                if from == to {
                    return value;
                }
                rules
                    .iter()
                    .find(|rule| rule.from == from && rule.to == to)
                    .map(|rule| rule.transform.apply(value))
                    .unwrap_or(f64::NAN)
            }
        }
    }

    /// Symbol of the unit whose factor is exactly 1 (linear strategies only)
    pub fn base_unit(&self) -> Option<&str> {
        match self {
            ConversionStrategy::Linear { factors } => factors
                .iter()
                .find(|(_, factor)| **factor == 1.0)
                .map(|(symbol, _)| symbol.as_str()),
            ConversionStrategy::Affine { .. } => None,
        }
    }
}

/// A named group of mutually convertible units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionCategory {
    pub name: String,
    pub units: Vec<Unit>,
    pub strategy: ConversionStrategy,
}

impl ConversionCategory {
    pub fn new(name: impl Into<String>, units: Vec<Unit>, strategy: ConversionStrategy) -> Self {
        Self {
            name: name.into(),
            units,
            strategy,
        }
    }

    /// Build a linear category from `(display name, symbol, factor)` rows
    pub fn linear(name: impl Into<String>, rows: &[(&str, &str, f64)]) -> Self {
        let units = rows
            .iter()
            .map(|(label, symbol, _)| Unit::new(*label, *symbol))
            .collect();
        let factors = rows
            .iter()
            .map(|(_, symbol, factor)| (symbol.to_string(), *factor))
            .collect();
        Self::new(name, units, ConversionStrategy::Linear { factors })
    }

    pub fn convert(&self, value: f64, from: &str, to: &str) -> f64 {
        self.strategy.convert(value, from, to)
    }

    /// Look up a unit's display info by symbol
    pub fn unit(&self, symbol: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.symbol == symbol)
    }

    /// Initial (from, to) selection: first unit, then the second if there is one
    pub fn default_pair(&self) -> Option<(&str, &str)> {
        let first = self.units.first()?;
        let second = self.units.get(1).unwrap_or(first);
        Some((first.symbol.as_str(), second.symbol.as_str()))
    }

    /// Check the unit list and strategy table against each other
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.units.is_empty() {
            return Err(ConfigError::NoUnits(self.name.clone()));
        }

        let mut symbols = HashSet::new();
        for unit in &self.units {
            if !symbols.insert(unit.symbol.as_str()) {
                return Err(ConfigError::DuplicateUnit {
                    category: self.name.clone(),
                    symbol: unit.symbol.clone(),
                });
            }
        }

        match &self.strategy {
            ConversionStrategy::Linear { factors } => {
                for symbol in factors.keys() {
                    if !symbols.contains(symbol.as_str()) {
                        return Err(self.unlisted(symbol));
                    }
                }
                for unit in &self.units {
                    match factors.get(&unit.symbol) {
                        None => {
                            return Err(ConfigError::MissingFactor {
                                category: self.name.clone(),
                                symbol: unit.symbol.clone(),
                            })
                        }
                        Some(factor) if !factor.is_finite() || *factor <= 0.0 => {
                            return Err(ConfigError::InvalidFactor {
                                category: self.name.clone(),
                                symbol: unit.symbol.clone(),
                                factor: *factor,
                            })
                        }
                        Some(_) => {}
                    }
                }
                let bases = factors.values().filter(|f| **f == 1.0).count();
                if bases != 1 {
                    return Err(ConfigError::BaseUnitCount {
                        category: self.name.clone(),
                        count: bases,
                    });
                }
            }
            ConversionStrategy::Affine { rules } => {
                let mut pairs = HashSet::new();
                for rule in rules {
                    for symbol in [&rule.from, &rule.to] {
                        if !symbols.contains(symbol.as_str()) {
                            return Err(self.unlisted(symbol));
                        }
                    }
                    if !pairs.insert((rule.from.as_str(), rule.to.as_str())) {
                        return Err(ConfigError::DuplicateRule {
                            category: self.name.clone(),
                            from: rule.from.clone(),
                            to: rule.to.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    fn unlisted(&self, symbol: &str) -> ConfigError {
        ConfigError::UnlistedSymbol {
            category: self.name.clone(),
            symbol: symbol.to_string(),
        }
    }
}
