//! Month grid data for the calendar view.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::entry::TimeEntry;
use crate::period::YearMonth;
use crate::resolver::{DayClassification, classify_group};

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// `None` when no entry starts on this day.
    pub classification: Option<DayClassification>,
}

/// A Monday-first month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarMonth {
    pub month: YearMonth,
    /// Empty cells before the 1st (Monday = 0 .. Sunday = 6).
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

/// Entries whose start date is `day`, in collection order.
///
/// Overnight entries appear on their start day only.
pub fn entries_starting_on(entries: &[TimeEntry], day: NaiveDate) -> Vec<&TimeEntry> {
    entries.iter().filter(|e| e.date == day).collect()
}

/// Builds the calendar grid for `month`.
pub fn month_calendar(entries: &[TimeEntry], month: YearMonth) -> CalendarMonth {
    let days = month
        .days()
        .map(|date| {
            let group = entries_starting_on(entries, date);
            let classification =
                (!group.is_empty()).then(|| classify_group(group.iter().copied()));
            CalendarDay {
                date,
                classification,
            }
        })
        .collect();

    CalendarMonth {
        month,
        leading_blanks: month.first_day().weekday().num_days_from_monday(),
        days,
    }
}
