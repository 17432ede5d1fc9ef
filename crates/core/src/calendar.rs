//! Projection of a calendar month onto reading plan days.
//!
//! Pure functions of `(year, month, completed set)` - nothing here touches
//! storage. The projection resolves each day of the month to its day-of-year
//! index (proleptic Gregorian), its plan passage, and a completion flag.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use crate::plan::PlanCatalog;

/// English month names, 1-indexed via `month - 1`.
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A single day within a projected month. Derived, never persisted.
#[derive(Debug, Clone)]
pub struct CalendarDay {
    /// Day of the month, `1..=31`.
    pub day: u32,
    /// Day of the year, `1..=366`.
    pub day_of_year: u16,
    /// Plan passage for this day; empty for leap-year day 366.
    pub passage: String,
    /// Whether the user has completed this day's reading.
    pub completed: bool,
}

/// A projected month handed to the presentation layer.
#[derive(Debug, Clone)]
pub struct CalendarMonth {
    /// Month number, `1..=12`.
    pub month: u32,
    /// English month name.
    pub month_name: &'static str,
    /// Calendar year.
    pub year: i32,
    /// One entry per day of the month, in order.
    pub days: Vec<CalendarDay>,
    /// Number of days in the month.
    pub total_days: u32,
    /// Day-of-year index of the first day of the month (for layout).
    pub start_day_of_year: u16,
}

/// Project a month of the plan for a user's completed-day set.
///
/// `month` outside `1..=12` is a precondition violation; callers validate
/// (or default) the month before projecting.
#[must_use]
pub fn project(
    year: i32,
    month: u32,
    completed: &HashSet<u16>,
    plan: &PlanCatalog,
) -> CalendarMonth {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .expect("month is validated to 1..=12 by the caller");
    let start_ordinal = first.ordinal();
    let total_days = days_in_month(year, month);

    let days = (0..total_days)
        .map(|offset| {
            let day_of_year = u16::try_from(start_ordinal + offset).unwrap_or(u16::MAX);
            CalendarDay {
                day: offset + 1,
                day_of_year,
                passage: plan.passage_for(day_of_year).to_string(),
                completed: completed.contains(&day_of_year),
            }
        })
        .collect();

    CalendarMonth {
        month,
        month_name: MONTH_NAMES
            .get(month as usize - 1)
            .copied()
            .unwrap_or_default(),
        year,
        days,
        total_days,
        start_day_of_year: u16::try_from(start_ordinal).unwrap_or(u16::MAX),
    }
}

/// Proleptic Gregorian leap-year rule.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> PlanCatalog {
        PlanCatalog::load().expect("embedded plan loads")
    }

    #[test]
    fn february_in_a_leap_year_has_29_days() {
        let month = project(2024, 2, &HashSet::new(), &plan());
        assert_eq!(month.total_days, 29);
        assert_eq!(month.days.len(), 29);
    }

    #[test]
    fn february_in_a_common_year_has_28_days() {
        let month = project(2023, 2, &HashSet::new(), &plan());
        assert_eq!(month.total_days, 28);
        assert_eq!(month.days.len(), 28);
    }

    #[test]
    fn january_starts_the_year() {
        let month = project(2023, 1, &HashSet::new(), &plan());
        assert_eq!(month.start_day_of_year, 1);
        assert_eq!(month.month_name, "January");
        let first = month.days.first().expect("january has days");
        assert_eq!(first.day, 1);
        assert_eq!(first.day_of_year, 1);
        assert!(!first.passage.is_empty());
    }

    #[test]
    fn march_day_of_year_shifts_in_leap_years() {
        let leap = project(2024, 3, &HashSet::new(), &plan());
        let common = project(2023, 3, &HashSet::new(), &plan());
        assert_eq!(leap.start_day_of_year, 61);
        assert_eq!(common.start_day_of_year, 60);
    }

    #[test]
    fn leap_year_day_366_has_no_passage() {
        let month = project(2024, 12, &HashSet::new(), &plan());
        let last = month.days.last().expect("december has days");
        assert_eq!(last.day_of_year, 366);
        assert_eq!(last.passage, "");
    }

    #[test]
    fn completion_flags_come_from_the_set() {
        let completed: HashSet<u16> = [32, 33].into_iter().collect();
        let month = project(2023, 2, &completed, &plan());
        let flagged: Vec<_> = month
            .days
            .iter()
            .filter(|d| d.completed)
            .map(|d| d.day_of_year)
            .collect();
        assert_eq!(flagged, vec![32, 33]);
    }
}
