//! Streak calculation
//!
//! Derives current streak, best streak and days since the last visit from a
//! set of visited calendar days. Everything here is a pure function of the
//! visit set and the day treated as "today".

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::{days_between, parse_iso_date};
use super::error::StreakResult;

/// Streak summary derived from a visit history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakData {
    pub current_streak: u32,
    pub best_streak: u32,
    pub days_not_opened: u32,
}

/// Compute streak data for `visits` as seen on `today`.
///
/// The current streak only counts while the last visit was today or
/// yesterday. A last visit dated after `today` reports zero idle days.
pub fn calculate_streak_data(visits: &BTreeSet<NaiveDate>, today: NaiveDate) -> StreakData {
    let days: Vec<NaiveDate> = visits.iter().copied().collect();
    let Some(&last_visit) = days.last() else {
        return StreakData::default();
    };

    let since_last = days_between(last_visit, today);
    if since_last < 0 {
        tracing::debug!("Last visit {} is after {}", last_visit, today);
    }

    let current_streak = if since_last <= 1 {
        trailing_run(&days)
    } else {
        0
    };

    let mut longest = 1;
    let mut run = 1;
    for pair in days.windows(2) {
        if days_between(pair[0], pair[1]) == 1 {
            run += 1;
        } else {
            longest = longest.max(run);
            run = 1;
        }
    }
    let best_streak = longest.max(run).max(current_streak);

    StreakData {
        current_streak,
        best_streak,
        days_not_opened: u32::try_from(since_last.max(0)).unwrap_or(u32::MAX),
    }
}

/// Parse ISO date strings and compute streak data.
///
/// Strings naming the same calendar day count once. Any malformed string
/// rejects the whole input.
pub fn calculate_streak_data_from_strings<'a, I>(visits: I, today: NaiveDate) -> StreakResult<StreakData>
where
    I: IntoIterator<Item = &'a str>,
{
    let days = visits
        .into_iter()
        .map(parse_iso_date)
        .collect::<StreakResult<BTreeSet<_>>>()?;
    Ok(calculate_streak_data(&days, today))
}

/// Length of the consecutive-day run ending at the last element
fn trailing_run(days: &[NaiveDate]) -> u32 {
    let mut run = 1;
    for pair in days.windows(2).rev() {
        if days_between(pair[0], pair[1]) != 1 {
            break;
        }
        run += 1;
    }
    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn d(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    fn set(days: &[&str]) -> BTreeSet<NaiveDate> {
        days.iter().map(|s| d(s)).collect()
    }

    #[test]
    fn test_empty_history() {
        let data = calculate_streak_data(&BTreeSet::new(), d("2024-01-03"));
        assert_eq!(data, StreakData::default());
        assert_eq!(
            data,
            StreakData {
                current_streak: 0,
                best_streak: 0,
                days_not_opened: 0
            }
        );
    }

    #[test]
    fn test_consecutive_run_ending_today() {
        let visits = set(&["2024-01-01", "2024-01-02", "2024-01-03"]);
        let data = calculate_streak_data(&visits, d("2024-01-03"));
        assert_eq!(data.current_streak, 3);
        assert_eq!(data.best_streak, 3);
        assert_eq!(data.days_not_opened, 0);
    }

    #[test]
    fn test_gap_breaks_current_but_not_best() {
        let visits = set(&["2024-01-01", "2024-01-02", "2024-01-10"]);
        let data = calculate_streak_data(&visits, d("2024-01-10"));
        assert_eq!(data.current_streak, 1);
        assert_eq!(data.best_streak, 2);
        assert_eq!(data.days_not_opened, 0);
    }

    #[test]
    fn test_last_visit_yesterday_keeps_streak() {
        let visits = set(&["2024-01-01", "2024-01-02"]);
        let data = calculate_streak_data(&visits, d("2024-01-03"));
        assert_eq!(data.current_streak, 2);
        assert_eq!(data.best_streak, 2);
        assert_eq!(data.days_not_opened, 1);
    }

    #[test]
    fn test_last_visit_three_days_ago() {
        let visits = set(&["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-07"]);
        let data = calculate_streak_data(&visits, d("2024-01-10"));
        assert_eq!(data.current_streak, 0);
        assert_eq!(data.days_not_opened, 3);
        assert_eq!(data.best_streak, 3);
    }

    #[test]
    fn test_single_old_visit() {
        let data = calculate_streak_data(&set(&["2023-06-01"]), d("2024-06-01"));
        assert_eq!(data.current_streak, 0);
        assert_eq!(data.best_streak, 1);
        assert_eq!(data.days_not_opened, 366);
    }

    #[test]
    fn test_run_across_month_and_year_boundaries() {
        let visits = set(&["2023-12-30", "2023-12-31", "2024-01-01", "2024-02-28", "2024-02-29", "2024-03-01"]);
        let data = calculate_streak_data(&visits, d("2024-03-01"));
        assert_eq!(data.current_streak, 3);
        assert_eq!(data.best_streak, 3);
    }

    #[test]
    fn test_future_visit_clamps_idle_days() {
        let visits = set(&["2024-01-04", "2024-01-05"]);
        let data = calculate_streak_data(&visits, d("2024-01-03"));
        assert_eq!(data.days_not_opened, 0);
        assert_eq!(data.current_streak, 2);
    }

    #[test]
    fn test_idempotent() {
        let visits = set(&["2024-01-01", "2024-01-03", "2024-01-04"]);
        let today = d("2024-01-04");
        assert_eq!(calculate_streak_data(&visits, today), calculate_streak_data(&visits, today));
    }

    #[test]
    fn test_from_strings_deduplicates_days() {
        let data =
            calculate_streak_data_from_strings(["2024-01-02", "2024-01-01", "2024-01-02 "], d("2024-01-02"))
                .unwrap();
        assert_eq!(data.current_streak, 2);
        assert_eq!(data.best_streak, 2);
    }

    #[test]
    fn test_from_strings_rejects_malformed() {
        let result = calculate_streak_data_from_strings(["2024-01-01", "not a date"], d("2024-01-02"));
        assert!(result.is_err());
    }

    #[test]
    fn test_json_field_names() {
        let data = StreakData {
            current_streak: 4,
            best_streak: 9,
            days_not_opened: 0,
        };
        let json = serde_json::to_value(data).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"currentStreak": 4, "bestStreak": 9, "daysNotOpened": 0})
        );
    }

    /// Runs computed directly over a bitmask of visited days
    fn reference_runs(mask: u32, width: u32, today_offset: i64) -> (u32, u32) {
        let mut best = 0;
        let mut run = 0;
        for bit in 0..width {
            if mask & (1 << bit) != 0 {
                run += 1;
                best = best.max(run);
            } else {
                run = 0;
            }
        }
        let last = (0..width).rev().find(|bit| mask & (1 << bit) != 0);
        let current = match last {
            Some(last) if today_offset - last as i64 <= 1 => {
                (0..=last).rev().take_while(|bit| mask & (1 << bit) != 0).count() as u32
            }
            _ => 0,
        };
        (current, best)
    }

    #[test]
    fn test_every_subset_of_a_two_week_window() {
        // Also shows the forward scan alone already yields the best streak:
        // the reference `best` never looks at the current streak.
        const WIDTH: u32 = 14;
        let start = d("2024-02-20");

        for mask in 0u32..(1 << WIDTH) {
            let visits: BTreeSet<NaiveDate> = (0..WIDTH)
                .filter(|bit| mask & (1 << bit) != 0)
                .map(|bit| start + Duration::days(bit as i64))
                .collect();

            for today_offset in [WIDTH as i64 - 1, WIDTH as i64, WIDTH as i64 + 2] {
                let today = start + Duration::days(today_offset);
                let data = calculate_streak_data(&visits, today);
                let (current, best) = reference_runs(mask, WIDTH, today_offset);

                assert_eq!(data.current_streak, current, "mask {:b} today +{}", mask, today_offset);
                assert_eq!(data.best_streak, best, "mask {:b} today +{}", mask, today_offset);
                assert!(data.best_streak >= data.current_streak);
            }
        }
    }
}
