//! Elapsed-hours calculation for a single entry.
//!
//! # Algorithm Summary
//!
//! 1. Leave entries are always zero hours.
//! 2. Start and end times become fractional hours since midnight.
//! 3. An entry whose end date differs from its start date crosses midnight
//!    exactly once: a negative difference wraps by 24 hours.
//! 4. A single-day entry never wraps; an end at or before the start is zero.
//!
//! Spans longer than 24 hours are not representable. A shift from 08:00 on
//! one day to 10:00 two days later yields 2 hours, not 50.

use crate::entry::EntrySpan;

/// Elapsed hours as a decimal. Never negative.
///
/// The value is unrounded; round only for display (see [`format_hours`]).
pub fn hours<E: EntrySpan + ?Sized>(entry: &E) -> f64 {
    if entry.kind().is_leave() {
        return 0.0;
    }

    let start = entry.start_time().fractional_hours();
    let end = entry.end_time().fractional_hours();
    let diff = end - start;

    if entry.spans_midnight() {
        if diff < 0.0 { diff + 24.0 } else { diff }
    } else {
        diff.max(0.0)
    }
}

/// Formats hours with one decimal place, e.g. `7.5`.
pub fn format_hours(hours: f64) -> String {
    format!("{hours:.1}")
}
