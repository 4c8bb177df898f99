//! Period roll-ups: summary buckets, weekly series, and statistics.
//!
//! Every function takes the full collection and a period and filters by
//! [`Period::includes`], so an overnight entry crossing a boundary counts
//! in both adjacent periods. Sums are kept unrounded.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::duration::hours;
use crate::entry::{EntrySpan, TimeEntry};
use crate::period::{Period, YearMonth, week_number};

/// Hour buckets for a period.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PeriodSummary {
    /// Hours of normal entries (and of unrecognized types).
    pub normal_hours: f64,
    /// Hours of overtime, night, and weekend entries.
    pub overtime_hours: f64,
    /// `normal_hours + overtime_hours`. Leave is never included.
    pub total_hours: f64,
    /// Distinct dates touched by non-leave entries, start and end dates both
    /// counted.
    pub days_worked: usize,
}

/// Hours logged in one week of a month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeekHours {
    pub week: u32,
    pub hours: f64,
}

/// Derived figures for the statistics view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodStatistics {
    pub days_worked: usize,
    /// `total_hours / days_worked`, or 0 when nothing was worked.
    pub average_hours_per_day: f64,
    /// Share of overtime in the total, rounded to a whole percent.
    pub overtime_percent: u32,
}

/// Summarizes an already-filtered set of entries.
pub fn summarize<'a, I, E>(entries: I) -> PeriodSummary
where
    I: IntoIterator<Item = &'a E>,
    E: EntrySpan + 'a,
{
    let mut summary = PeriodSummary::default();
    let mut days: BTreeSet<NaiveDate> = BTreeSet::new();

    for entry in entries {
        let kind = entry.kind();
        if kind.is_leave() {
            continue;
        }
        let h = hours(entry);
        if kind.is_premium() {
            summary.overtime_hours += h;
        } else {
            summary.normal_hours += h;
        }
        summary.total_hours += h;

        days.insert(entry.date());
        if let Some(end) = entry.end_date() {
            days.insert(end);
        }
    }

    summary.days_worked = days.len();
    summary
}

/// Summary of the entries belonging to `period`.
pub fn period_summary(entries: &[TimeEntry], period: &Period) -> PeriodSummary {
    summarize(entries.iter().filter(|e| period.includes(*e)))
}

/// Hours per week for entries starting in `month`, ascending by week.
///
/// Leave entries are skipped and weeks without entries are omitted.
pub fn weekly_series(entries: &[TimeEntry], month: YearMonth) -> Vec<WeekHours> {
    let mut weeks: BTreeMap<u32, f64> = BTreeMap::new();
    for entry in entries
        .iter()
        .filter(|e| month.contains(e.date) && !e.kind.is_leave())
    {
        *weeks.entry(week_number(entry.date)).or_default() += hours(entry);
    }

    weeks
        .into_iter()
        .map(|(week, hours)| WeekHours { week, hours })
        .collect()
}

/// Statistics for `period`, derived from its summary.
pub fn period_statistics(entries: &[TimeEntry], period: &Period) -> PeriodStatistics {
    statistics_from(&period_summary(entries, period))
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn statistics_from(summary: &PeriodSummary) -> PeriodStatistics {
    let average_hours_per_day = if summary.days_worked > 0 {
        summary.total_hours / summary.days_worked as f64
    } else {
        0.0
    };
    let overtime_percent = if summary.total_hours > 0.0 {
        (100.0 * summary.overtime_hours / summary.total_hours).round() as u32
    } else {
        0
    };

    PeriodStatistics {
        days_worked: summary.days_worked,
        average_hours_per_day,
        overtime_percent,
    }
}

/// Entries belonging to `period`, newest start date first.
///
/// Entries sharing a start date keep their collection order.
pub fn entries_in_period<'a>(entries: &'a [TimeEntry], period: &Period) -> Vec<&'a TimeEntry> {
    let mut selected: Vec<_> = entries.iter().filter(|e| period.includes(*e)).collect();
    selected.sort_by(|a, b| b.date.cmp(&a.date));
    selected
}
