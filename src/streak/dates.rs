//! Calendar-day helpers

use chrono::{Local, NaiveDate};

use super::error::{StreakError, StreakResult};

/// Persisted date format: "2024-01-31"
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO `yyyy-MM-dd` calendar day
pub fn parse_iso_date(s: &str) -> StreakResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), ISO_DATE_FORMAT).map_err(|source| {
        StreakError::MalformedDate {
            input: s.to_string(),
            source,
        }
    })
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Whole calendar days from `earlier` to `later` (negative if reversed)
pub fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// Today's local calendar day
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
