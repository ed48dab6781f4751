//! Visit streak module
//!
//! Tracks which days the app was opened and derives streaks from them.

pub mod calculator;
pub mod dates;
pub mod error;
pub mod history;

pub use calculator::{calculate_streak_data, calculate_streak_data_from_strings, StreakData};
pub use dates::{days_between, format_iso_date, parse_iso_date, today, ISO_DATE_FORMAT};
pub use error::{StreakError, StreakResult};
pub use history::{VisitHistory, MAX_VISIT_HISTORY};
