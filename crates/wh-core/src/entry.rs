//! The time-entry record and its validation rules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::duration::hours;
use crate::entry_type::EntryType;
use crate::types::{ClockTime, EntryId, ValidationError};

/// Read access to the fields that take part in hour computation and
/// period membership.
///
/// Implemented by stored entries and by validated drafts so the same
/// duration and classification code serves both.
pub trait EntrySpan {
    /// The entry's type.
    fn kind(&self) -> &EntryType;

    /// The start date. Also the date the entry is bucketed under.
    fn date(&self) -> NaiveDate;

    /// The end date, present only for entries spanning two days.
    fn end_date(&self) -> Option<NaiveDate>;

    fn start_time(&self) -> ClockTime;

    fn end_time(&self) -> ClockTime;

    /// Whether the entry crosses midnight into a different end date.
    fn spans_midnight(&self) -> bool {
        self.end_date().is_some_and(|end| end != self.date())
    }

    /// Whether either the start date or the end date is `day`.
    fn touches(&self, day: NaiveDate) -> bool {
        self.date() == day || self.end_date() == Some(day)
    }
}

/// One recorded time block or leave day.
///
/// Serialized with the camelCase keys used by the import and export files.
/// Keys this type does not know about are kept in `extra` and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: EntryId,

    pub date: NaiveDate,

    pub start_time: ClockTime,

    pub end_time: ClockTime,

    #[serde(
        default,
        deserialize_with = "blank_date_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,

    #[serde(rename = "type")]
    pub kind: EntryType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<CreatedAt>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// When an entry was created, as written by the client that created it.
///
/// Stamps that are not RFC 3339 timestamps are kept verbatim so they are
/// written back unchanged on export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreatedAt {
    Timestamp(DateTime<Utc>),
    Other(Value),
}

impl CreatedAt {
    pub const fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            Self::Other(_) => None,
        }
    }
}

impl From<DateTime<Utc>> for CreatedAt {
    fn from(timestamp: DateTime<Utc>) -> Self {
        Self::Timestamp(timestamp)
    }
}

impl TimeEntry {
    /// Replaces every editable field with the validated values.
    ///
    /// `id` and `created_at` are kept. Unknown keys are dropped since they
    /// may describe the old field values.
    pub fn replace_with(&mut self, fields: NormalizedEntry) {
        self.date = fields.date;
        self.start_time = fields.start_time;
        self.end_time = fields.end_time;
        self.end_date = fields.end_date;
        self.kind = fields.kind;
        self.notes = fields.notes;
        self.extra.clear();
    }

    /// Elapsed hours for this entry.
    pub fn hours(&self) -> f64 {
        hours(self)
    }
}

impl EntrySpan for TimeEntry {
    fn kind(&self) -> &EntryType {
        &self.kind
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    fn start_time(&self) -> ClockTime {
        self.start_time
    }

    fn end_time(&self) -> ClockTime {
        self.end_time
    }
}

/// Older clients write `"endDate": ""` for single-day entries.
fn blank_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Raw user input for a new or edited entry. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub date: Option<NaiveDate>,
    pub start_time: Option<ClockTime>,
    pub end_time: Option<ClockTime>,
    /// Whether the entry is meant to end on a later date.
    pub spans_two_days: bool,
    pub end_date: Option<NaiveDate>,
    pub kind: EntryType,
    pub notes: Option<String>,
}

/// A draft that passed validation, ready to receive an ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEntry {
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub end_date: Option<NaiveDate>,
    pub kind: EntryType,
    pub notes: Option<String>,
}

impl NormalizedEntry {
    /// Attaches identity and creation time, producing a stored entry.
    pub fn into_entry(self, id: EntryId, created_at: DateTime<Utc>) -> TimeEntry {
        TimeEntry {
            id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            end_date: self.end_date,
            kind: self.kind,
            notes: self.notes,
            created_at: Some(created_at.into()),
            extra: Map::new(),
        }
    }
}

impl EntrySpan for NormalizedEntry {
    fn kind(&self) -> &EntryType {
        &self.kind
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    fn start_time(&self) -> ClockTime {
        self.start_time
    }

    fn end_time(&self) -> ClockTime {
        self.end_time
    }
}

/// Validates a draft and normalizes it.
///
/// Checks, in order: the date is present; for non-leave entries both times
/// are present; for two-day entries the end date is present and not before
/// the start date; for non-leave entries the duration is positive. Leave
/// entries skip the duration check and get [`ClockTime::MIDNIGHT`] for both
/// times.
pub fn validate(draft: &EntryDraft) -> Result<NormalizedEntry, ValidationError> {
    let date = draft
        .date
        .ok_or(ValidationError::MissingField { field: "date" })?;

    let is_leave = draft.kind.is_leave();
    let (start_time, end_time) = if is_leave {
        (ClockTime::MIDNIGHT, ClockTime::MIDNIGHT)
    } else {
        let start = draft
            .start_time
            .ok_or(ValidationError::MissingField { field: "startTime" })?;
        let end = draft
            .end_time
            .ok_or(ValidationError::MissingField { field: "endTime" })?;
        (start, end)
    };

    let end_date = if draft.spans_two_days {
        let end_date = draft.end_date.ok_or(ValidationError::MissingEndDate)?;
        if end_date < date {
            return Err(ValidationError::EndDateBeforeStart { date, end_date });
        }
        Some(end_date)
    } else {
        None
    };

    let notes = draft
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    let normalized = NormalizedEntry {
        date,
        start_time,
        end_time,
        end_date,
        kind: draft.kind.clone(),
        notes,
    };

    if !is_leave {
        let hours = hours(&normalized);
        if hours <= 0.0 {
            return Err(ValidationError::NonPositiveDuration { hours });
        }
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn time(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn shift(date: u32, start: &str, end: &str) -> EntryDraft {
        EntryDraft {
            date: Some(day(date)),
            start_time: Some(time(start)),
            end_time: Some(time(end)),
            ..EntryDraft::default()
        }
    }

    #[test]
    fn test_rejects_missing_date_first() {
        let draft = EntryDraft::default();
        assert_eq!(
            validate(&draft).unwrap_err(),
            ValidationError::MissingField { field: "date" }
        );
    }

    #[test]
    fn test_rejects_missing_times_for_shifts() {
        let mut draft = shift(3, "08:00", "12:00");
        draft.start_time = None;
        assert_eq!(
            validate(&draft).unwrap_err(),
            ValidationError::MissingField { field: "startTime" }
        );

        let mut draft = shift(3, "08:00", "12:00");
        draft.end_time = None;
        assert_eq!(
            validate(&draft).unwrap_err(),
            ValidationError::MissingField { field: "endTime" }
        );
    }

    #[test]
    fn test_two_day_entry_requires_end_date() {
        let mut draft = shift(3, "20:00", "05:00");
        draft.spans_two_days = true;
        assert_eq!(validate(&draft).unwrap_err(), ValidationError::MissingEndDate);
    }

    #[test]
    fn test_two_day_entry_rejects_end_before_start() {
        let mut draft = shift(3, "20:00", "05:00");
        draft.spans_two_days = true;
        draft.end_date = Some(day(2));
        assert_eq!(
            validate(&draft).unwrap_err(),
            ValidationError::EndDateBeforeStart {
                date: day(3),
                end_date: day(2),
            }
        );
    }

    #[test]
    fn test_same_day_reversed_times_are_non_positive() {
        let draft = shift(3, "20:00", "05:00");
        assert!(matches!(
            validate(&draft).unwrap_err(),
            ValidationError::NonPositiveDuration { .. }
        ));
    }

    #[test]
    fn test_overnight_entry_is_accepted() {
        let mut draft = shift(3, "20:00", "05:00");
        draft.spans_two_days = true;
        draft.end_date = Some(day(4));
        let normalized = validate(&draft).unwrap();
        assert_eq!(normalized.end_date, Some(day(4)));
        assert!((hours(&normalized) - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_end_date_is_dropped_when_not_spanning() {
        let mut draft = shift(3, "08:00", "12:00");
        draft.end_date = Some(day(4));
        let normalized = validate(&draft).unwrap();
        assert_eq!(normalized.end_date, None);
    }

    #[test]
    fn test_leave_skips_time_and_duration_checks() {
        let draft = EntryDraft {
            date: Some(day(3)),
            kind: EntryType::Leave,
            ..EntryDraft::default()
        };
        let normalized = validate(&draft).unwrap();
        assert_eq!(normalized.start_time, ClockTime::MIDNIGHT);
        assert_eq!(normalized.end_time, ClockTime::MIDNIGHT);
    }

    #[test]
    fn test_leave_placeholders_replace_supplied_times() {
        let mut draft = shift(3, "08:00", "17:00");
        draft.kind = EntryType::Leave;
        let normalized = validate(&draft).unwrap();
        assert_eq!(normalized.start_time, ClockTime::MIDNIGHT);
    }

    #[test]
    fn test_blank_notes_are_dropped() {
        let mut draft = shift(3, "08:00", "12:00");
        draft.notes = Some("   ".to_string());
        assert_eq!(validate(&draft).unwrap().notes, None);

        draft.notes = Some(" inventory ".to_string());
        assert_eq!(validate(&draft).unwrap().notes.as_deref(), Some("inventory"));
    }

    #[test]
    fn test_entry_json_uses_camel_case_keys() {
        let created = DateTime::parse_from_rfc3339("2025-03-03T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let entry = validate(&shift(3, "08:00", "12:00"))
            .unwrap()
            .into_entry(EntryId::new("1").unwrap(), created);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "date": "2025-03-03",
                "startTime": "08:00",
                "endTime": "12:00",
                "type": "normal",
                "createdAt": "2025-03-03T08:00:00Z"
            })
        );
    }

    #[test]
    fn test_entry_json_keeps_unknown_keys_and_blank_end_date() {
        let raw = r#"{"id":"17","date":"2025-03-03","startTime":"20:30","endTime":"05:30","endDate":"","type":"night","notes":"","spreadOverTwoDays":false}"#;
        let entry: TimeEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.end_date, None);
        assert_eq!(entry.notes.as_deref(), Some(""));
        assert_eq!(entry.extra.get("spreadOverTwoDays"), Some(&Value::Bool(false)));

        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["spreadOverTwoDays"], Value::Bool(false));
    }

    #[test]
    fn test_replace_with_keeps_identity() {
        let created = Utc::now();
        let mut entry = validate(&shift(3, "08:00", "12:00"))
            .unwrap()
            .into_entry(EntryId::new("keep").unwrap(), created);
        entry
            .extra
            .insert("spreadOverTwoDays".to_string(), Value::Bool(false));

        let edited = validate(&shift(4, "09:00", "18:00")).unwrap();
        entry.replace_with(edited);

        assert_eq!(entry.id.as_str(), "keep");
        assert_eq!(entry.created_at, Some(CreatedAt::Timestamp(created)));
        assert_eq!(entry.date, day(4));
        assert!(entry.extra.is_empty());
    }
}
