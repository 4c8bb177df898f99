//! Dominant-type resolution for a group of entries.

use std::fmt;

use serde::Serialize;

use crate::duration::{format_hours, hours};
use crate::entry::EntrySpan;
use crate::entry_type::EntryType;

/// Result of classifying a group of entries sharing a day or period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayClassification {
    /// Highest-priority type in the group.
    pub dominant: EntryType,
    /// Hours over the non-leave entries, or the leave marker when leave
    /// dominates.
    pub hours: DayHours,
    pub entry_count: usize,
}

/// What a classified group shows in place of its hour count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DayHours {
    Hours(f64),
    /// The group is dominated by leave; no hour count is reported.
    OnLeave,
}

impl DayHours {
    /// The numeric value, if any.
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Hours(h) => Some(h),
            Self::OnLeave => None,
        }
    }
}

impl fmt::Display for DayHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hours(h) => write!(f, "{}h", format_hours(*h)),
            Self::OnLeave => f.write_str(LEAVE_MARKER),
        }
    }
}

impl Serialize for DayHours {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Hours(h) => serializer.serialize_f64(*h),
            Self::OnLeave => serializer.serialize_str(LEAVE_MARKER),
        }
    }
}

/// Token shown instead of an hour count for a leave day.
pub const LEAVE_MARKER: &str = "leave";

/// Classifies a group of entries.
///
/// The dominant type starts as [`EntryType::Normal`] and is replaced only by
/// an entry of strictly higher priority, so on a tie the first entry seen
/// at that priority wins. Unrecognized types rank with normal and can never
/// become dominant. Leave entries never add to the hour count, and when
/// leave dominates no count is reported at all. An empty group is normal
/// with zero hours.
pub fn classify_group<'a, I, E>(entries: I) -> DayClassification
where
    I: IntoIterator<Item = &'a E>,
    E: EntrySpan + 'a,
{
    let mut dominant = EntryType::Normal;
    let mut total_hours = 0.0;
    let mut entry_count = 0;

    for entry in entries {
        entry_count += 1;
        if entry.kind().priority() > dominant.priority() {
            dominant = entry.kind().clone();
        }
        if !entry.kind().is_leave() {
            total_hours += hours(entry);
        }
    }

    let day_hours = if dominant.is_leave() {
        DayHours::OnLeave
    } else {
        DayHours::Hours(total_hours)
    };

    DayClassification {
        dominant,
        hours: day_hours,
        entry_count,
    }
}
