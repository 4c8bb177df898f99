//! Calendar periods used to scope aggregation.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::entry::EntrySpan;
use crate::types::ValidationError;

/// A calendar month, printed and parsed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    /// Creates a month, rejecting month numbers outside 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or_else(|| ValidationError::InvalidMonth {
                value: format!("{year:04}-{month:02}"),
            })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    pub fn month(self) -> u32 {
        self.first.month()
    }

    pub const fn first_day(self) -> NaiveDate {
        self.first
    }

    pub fn last_day(self) -> NaiveDate {
        self.next().first.pred_opt().unwrap_or(NaiveDate::MAX)
    }

    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last_day();
        self.first.iter_days().take_while(move |d| *d <= last)
    }

    /// The following month, wrapping December into January.
    #[must_use]
    pub fn next(self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map_or(self, |first| Self { first })
    }

    /// The preceding month, wrapping January into December.
    #[must_use]
    pub fn previous(self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map_or(self, |first| Self { first })
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidMonth {
            value: s.to_string(),
        };
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// The scope of an aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Month(YearMonth),
    /// Inclusive on both ends.
    Range { start: NaiveDate, end: NaiveDate },
    Day(NaiveDate),
}

impl Period {
    /// Creates an inclusive date range, rejecting `end < start`.
    pub fn range(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidRange { start, end });
        }
        Ok(Self::Range { start, end })
    }

    /// First and last day of the period, both inclusive.
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        match *self {
            Self::Month(month) => (month.first_day(), month.last_day()),
            Self::Range { start, end } => (start, end),
            Self::Day(day) => (day, day),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let (start, end) = self.bounds();
        start <= date && date <= end
    }

    /// Whether the entry's start date or end date falls inside the period.
    ///
    /// An overnight entry crossing a period boundary belongs to both sides.
    pub fn includes<E: EntrySpan + ?Sized>(&self, entry: &E) -> bool {
        self.contains(entry.date()) || entry.end_date().is_some_and(|end| self.contains(end))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month(month) => write!(f, "{month}"),
            Self::Range { start, end } => write!(f, "{start} to {end}"),
            Self::Day(day) => write!(f, "{day}"),
        }
    }
}

/// Week-of-year number for the weekly chart.
///
/// Weeks start on Sunday and week 1 is the (possibly partial) week holding
/// January 1st: `ceil((day_of_year_index + weekday_of_jan_1 + 1) / 7)` with
/// weekdays counted from Sunday = 0. Not ISO 8601.
pub fn week_number(date: NaiveDate) -> u32 {
    let past_days = date.ordinal0();
    let weekday = date.weekday().num_days_from_sunday();
    let jan_first_weekday = (weekday + 7 - past_days % 7) % 7;
    (past_days + jan_first_weekday + 1).div_ceil(7)
}
