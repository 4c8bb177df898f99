//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for entries and their fields.
///
/// Every variant is recoverable: callers surface the message and leave the
/// collection untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A required field was not supplied.
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    /// A time-of-day string could not be parsed as `HH:MM`.
    #[error("invalid time of day: {value} (expected HH:MM)")]
    InvalidClockTime { value: String },

    /// The entry spans two days but no end date was given.
    #[error("an end date is required for an entry spanning two days")]
    MissingEndDate,

    /// The end date is chronologically before the start date.
    #[error("end date {end_date} is before start date {date}")]
    EndDateBeforeStart { date: NaiveDate, end_date: NaiveDate },

    /// The computed duration was zero or negative.
    #[error("duration must be positive, got {hours:.1}h")]
    NonPositiveDuration { hours: f64 },

    /// No entry with this ID exists in the collection.
    #[error("no entry with id {id}")]
    UnknownEntry { id: String },

    /// A month string could not be parsed as `YYYY-MM`.
    #[error("invalid month: {value} (expected YYYY-MM)")]
    InvalidMonth { value: String },

    /// A date range whose end precedes its start.
    #[error("range end {end} is before range start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

/// A validated entry identifier.
///
/// Entry IDs must be non-empty strings. They are opaque, stable for the
/// lifetime of the entry, and used as the merge key on import.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryId(String);

impl EntryId {
    /// Creates a new ID after validation.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::Empty { field: "entry ID" });
        }
        Ok(Self(id))
    }

    /// Generates a fresh random ID for a manually created entry.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EntryId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntryId> for String {
    fn from(id: EntryId) -> Self {
        id.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A wall-clock time of day on a 24-hour scale, minute precision.
///
/// Serialized as `HH:MM`. Parsing also accepts a single-digit hour and a
/// trailing `:SS` component, which is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    /// Midnight; also the neutral placeholder stored on leave entries.
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Creates a clock time, rejecting out-of-range components.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::InvalidClockTime {
                value: format!("{hour}:{minute:02}"),
            });
        }
        Ok(Self { hour, minute })
    }

    #[must_use]
    pub const fn hour(self) -> u32 {
        self.hour
    }

    #[must_use]
    pub const fn minute(self) -> u32 {
        self.minute
    }

    /// Hours since midnight as a decimal: `hour + minute / 60`.
    #[must_use]
    pub fn fractional_hours(self) -> f64 {
        f64::from(self.hour) + f64::from(self.minute) / 60.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidClockTime {
            value: s.to_string(),
        };

        let mut parts = s.trim().split(':');
        let (Some(hour), Some(minute)) = (parts.next(), parts.next()) else {
            return Err(invalid());
        };
        // Seconds, if present, must still be numeric.
        if let Some(seconds) = parts.next() {
            if seconds.parse::<u32>().is_err() || parts.next().is_some() {
                return Err(invalid());
            }
        }
        if minute.len() != 2 || hour.is_empty() || hour.len() > 2 {
            return Err(invalid());
        }

        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
