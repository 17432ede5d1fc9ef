//! Display data for templates.

use setahun_core::{CalendarDay, CalendarMonth, PassageLink, passage};

/// A single plan day ready for rendering.
#[derive(Debug, Clone)]
pub struct DayView {
    /// Day of the month, `1..=31`.
    pub day: u32,
    /// Day of the year, `1..=366`.
    pub day_of_year: u16,
    /// Whether the reading is done.
    pub completed: bool,
    /// Expanded passage links; empty for leap-year day 366.
    pub links: Vec<PassageLink>,
}

impl From<&CalendarDay> for DayView {
    fn from(day: &CalendarDay) -> Self {
        Self {
            day: day.day,
            day_of_year: day.day_of_year,
            completed: day.completed,
            links: passage::links_for(&day.passage),
        }
    }
}

/// A month card ready for rendering.
#[derive(Debug, Clone)]
pub struct MonthView {
    /// Month number, `1..=12`.
    pub month: u32,
    /// English month name.
    pub name: &'static str,
    /// Calendar year.
    pub year: i32,
    /// One view per day of the month, in order.
    pub days: Vec<DayView>,
    /// Completed readings in this month.
    pub completed_count: usize,
    /// Number of days in the month.
    pub total_days: u32,
}

impl From<CalendarMonth> for MonthView {
    fn from(month: CalendarMonth) -> Self {
        let days: Vec<DayView> = month.days.iter().map(DayView::from).collect();
        let completed_count = days.iter().filter(|d| d.completed).count();

        Self {
            month: month.month,
            name: month.month_name,
            year: month.year,
            days,
            completed_count,
            total_days: month.total_days,
        }
    }
}
