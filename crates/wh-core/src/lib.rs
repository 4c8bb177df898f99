//! Core accounting logic for the work-hours ledger.
//!
//! This crate contains the entry model and the pure computations over it:
//! - Duration: elapsed hours per entry, including overnight shifts
//! - Classification: the dominant type of a day or group of entries
//! - Aggregation: period summaries, weekly series, statistics, reports
//! - Import/export: merge-by-id and replace over JSON entry arrays

pub mod aggregate;
pub mod calendar;
mod duration;
pub mod entry;
pub mod entry_type;
pub mod ledger;
pub mod merge;
pub mod period;
pub mod report;
pub mod resolver;
pub mod types;

pub use aggregate::{
    PeriodStatistics, PeriodSummary, WeekHours, entries_in_period, period_statistics,
    period_summary, weekly_series,
};
pub use calendar::{CalendarDay, CalendarMonth, entries_starting_on, month_calendar};
pub use duration::{format_hours, hours};
pub use entry::{CreatedAt, EntryDraft, EntrySpan, NormalizedEntry, TimeEntry, validate};
pub use entry_type::EntryType;
pub use ledger::Ledger;
pub use merge::{
    ImportFormatError, ImportMode, MergeOutcome, export_file_name, export_json, import,
    merge_or_replace, parse_import,
};
pub use period::{Period, YearMonth, week_number};
pub use report::{MonthGroup, Report, ReportRow, build_report};
pub use resolver::{DayClassification, DayHours, LEAVE_MARKER, classify_group};
pub use types::{ClockTime, EntryId, ValidationError};
