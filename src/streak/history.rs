//! Visit history
//!
//! The set of days a user was active, capped to the most recent year. Stored
//! on disk as a JSON array of ISO date strings.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calculator::{calculate_streak_data, StreakData};
use super::dates::{format_iso_date, parse_iso_date};
use super::error::{StreakError, StreakResult};

/// Maximum number of days kept in a history
pub const MAX_VISIT_HISTORY: usize = 365;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct VisitHistory {
    days: BTreeSet<NaiveDate>,
}

impl VisitHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse ISO date strings, rejecting the whole input on any malformed entry
    pub fn from_iso_strings<I, S>(dates: I) -> StreakResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let days = dates
            .into_iter()
            .map(|s| parse_iso_date(s.as_ref()))
            .collect::<StreakResult<BTreeSet<_>>>()?;
        let mut history = Self { days };
        history.enforce_cap();
        Ok(history)
    }

    /// Add `day` to the history.
    ///
    /// Returns whether the history changed. Recording a day already present,
    /// or one older than everything kept at capacity, is a no-op.
    pub fn record_visit(&mut self, day: NaiveDate) -> bool {
        if !self.days.insert(day) {
            return false;
        }
        self.enforce_cap();
        self.days.contains(&day)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.days.contains(&day)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn last_visit(&self) -> Option<NaiveDate> {
        self.days.last().copied()
    }

    /// Days in ascending order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().copied()
    }

    pub fn streak_data(&self, today: NaiveDate) -> StreakData {
        calculate_streak_data(&self.days, today)
    }

    /// Load a history file; a missing file is an empty history
    pub fn load(path: &Path) -> StreakResult<Self> {
        if !path.exists() {
            tracing::info!("No visit history at {}, starting empty", path.display());
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)?;
        let history: Self = serde_json::from_str(&json)?;
        tracing::info!("Loaded {} visits from {}", history.len(), path.display());
        Ok(history)
    }

    pub fn save(&self, path: &Path) -> StreakResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        tracing::debug!("Saved {} visits to {}", self.len(), path.display());
        Ok(())
    }

    fn enforce_cap(&mut self) {
        let mut evicted = 0;
        while self.days.len() > MAX_VISIT_HISTORY {
            self.days.pop_first();
            evicted += 1;
        }
        if evicted > 0 {
            tracing::warn!("Visit history over capacity, dropped {} oldest days", evicted);
        }
    }
}

impl TryFrom<Vec<String>> for VisitHistory {
    type Error = StreakError;

    fn try_from(dates: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_iso_strings(dates)
    }
}

impl From<VisitHistory> for Vec<String> {
    fn from(history: VisitHistory) -> Self {
        history.days.into_iter().map(format_iso_date).collect()
    }
}
