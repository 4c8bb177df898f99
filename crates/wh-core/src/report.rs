//! Row data for printable date-range reports.
//!
//! Layout, pagination, and styling belong to whatever renders the report;
//! this module only selects, orders, and groups the rows.

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::{PeriodSummary, summarize};
use crate::entry::TimeEntry;
use crate::period::{Period, YearMonth};
use crate::types::ValidationError;

/// One line of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// `HH:MM - HH:MM`, blank for leave.
    pub time_range: Option<String>,
    /// Blank for leave.
    pub hours: Option<f64>,
    pub type_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ReportRow {
    fn from_entry(entry: &TimeEntry) -> Self {
        let is_leave = entry.kind.is_leave();
        Self {
            date: entry.date,
            end_date: entry.end_date.filter(|end| *end != entry.date),
            time_range: (!is_leave)
                .then(|| format!("{} - {}", entry.start_time, entry.end_time)),
            hours: (!is_leave).then(|| entry.hours()),
            type_label: entry.kind.label(),
            notes: entry.notes.clone().filter(|n| !n.trim().is_empty()),
        }
    }
}

/// Rows sharing a start month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGroup {
    pub month: YearMonth,
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Ascending by month.
    pub months: Vec<MonthGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<PeriodSummary>,
}

impl Report {
    pub fn row_count(&self) -> usize {
        self.months.iter().map(|m| m.rows.len()).sum()
    }
}

/// Builds the report for the inclusive range `start..=end`.
///
/// An entry is included when its start or end date falls in the range.
/// Rows are ordered by start date then start time and grouped by the month
/// of their start date.
pub fn build_report(
    entries: &[TimeEntry],
    start: NaiveDate,
    end: NaiveDate,
    include_summary: bool,
) -> Result<Report, ValidationError> {
    let period = Period::range(start, end)?;

    let mut selected: Vec<&TimeEntry> = entries.iter().filter(|e| period.includes(*e)).collect();
    selected.sort_by_key(|e| (e.date, e.start_time));

    let mut months: Vec<MonthGroup> = Vec::new();
    for entry in &selected {
        let month = YearMonth::of(entry.date);
        let row = ReportRow::from_entry(entry);
        match months.last_mut() {
            Some(group) if group.month == month => group.rows.push(row),
            _ => months.push(MonthGroup {
                month,
                rows: vec![row],
            }),
        }
    }

    let summary = include_summary.then(|| summarize(selected.iter().copied()));

    Ok(Report {
        start,
        end,
        months,
        summary,
    })
}
