//! Import parsing, merge-by-identity, and export.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use crate::entry::TimeEntry;
use crate::types::{ClockTime, EntryId, ValidationError};

/// Keys every imported element must carry as a non-empty string.
const REQUIRED_KEYS: [&str; 5] = ["id", "date", "startTime", "endTime", "type"];

/// Reasons an import buffer is rejected as a whole.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportFormatError {
    #[error("import file is not valid JSON: {message}")]
    InvalidJson { message: String },

    #[error("import file must contain a JSON array of entries")]
    NotAnArray,

    #[error("entry #{index} is not an object")]
    NotAnObject { index: usize },

    #[error("entry #{index} is missing required field {field}")]
    MissingField { index: usize, field: &'static str },

    #[error("entry #{index} is invalid: {message}")]
    InvalidElement { index: usize, message: String },
}

/// How an import combines with the existing collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Keep everything and append entries with unseen ids.
    #[default]
    Merge,
    /// The imported collection becomes the whole collection.
    Replace,
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Merge => f.write_str("merge"),
            Self::Replace => f.write_str("replace"),
        }
    }
}

/// The collection produced by an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub entries: Vec<TimeEntry>,
    pub mode: ImportMode,
    /// Entries added on merge, or entries in the replacement.
    pub count: usize,
}

/// Parses and structurally validates an import buffer.
///
/// The buffer must hold a JSON array whose every element is an object with
/// non-empty string values for `id`, `date`, `startTime`, `endTime`, and
/// `type`, and an `endDate`, when given, must not precede `date`. A leave
/// element whose times are not valid `HH:MM` gets the midnight placeholder
/// instead. The first bad element fails the whole buffer.
pub fn parse_import(buffer: &str) -> Result<Vec<TimeEntry>, ImportFormatError> {
    let value: Value =
        serde_json::from_str(buffer).map_err(|e| ImportFormatError::InvalidJson {
            message: e.to_string(),
        })?;
    let Value::Array(items) = value else {
        return Err(ImportFormatError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| parse_element(index, item))
        .collect()
}

fn parse_element(index: usize, mut item: Value) -> Result<TimeEntry, ImportFormatError> {
    let Some(object) = item.as_object_mut() else {
        return Err(ImportFormatError::NotAnObject { index });
    };

    for field in REQUIRED_KEYS {
        match object.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => {}
            None | Some(Value::Null | Value::String(_)) => {
                return Err(ImportFormatError::MissingField { index, field });
            }
            Some(_) => {
                return Err(ImportFormatError::InvalidElement {
                    index,
                    message: format!("{field} must be a string"),
                });
            }
        }
    }

    if object.get("type").and_then(Value::as_str) == Some("leave") {
        for field in ["startTime", "endTime"] {
            let valid = object
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| s.parse::<ClockTime>().is_ok());
            if !valid {
                object.insert(
                    field.to_string(),
                    Value::String(ClockTime::MIDNIGHT.to_string()),
                );
            }
        }
    }

    let entry: TimeEntry =
        serde_json::from_value(item).map_err(|e| ImportFormatError::InvalidElement {
            index,
            message: e.to_string(),
        })?;

    if let Some(end_date) = entry.end_date.filter(|end| *end < entry.date) {
        return Err(ImportFormatError::InvalidElement {
            index,
            message: ValidationError::EndDateBeforeStart {
                date: entry.date,
                end_date,
            }
            .to_string(),
        });
    }

    Ok(entry)
}

/// Combines an already-validated incoming collection with the existing one.
///
/// Merge keeps every existing entry untouched and appends incoming entries
/// whose id is not yet present, including ids seen earlier in the same
/// incoming batch. Replace returns `incoming` verbatim.
pub fn merge_or_replace(
    existing: &[TimeEntry],
    incoming: Vec<TimeEntry>,
    mode: ImportMode,
) -> MergeOutcome {
    match mode {
        ImportMode::Replace => MergeOutcome {
            count: incoming.len(),
            entries: incoming,
            mode,
        },
        ImportMode::Merge => {
            let mut seen: HashSet<EntryId> = existing.iter().map(|e| e.id.clone()).collect();
            let mut entries = existing.to_vec();
            let mut count = 0;
            for entry in incoming {
                if seen.insert(entry.id.clone()) {
                    entries.push(entry);
                    count += 1;
                }
            }
            MergeOutcome {
                entries,
                mode,
                count,
            }
        }
    }
}

/// Parses `buffer` and combines it with `existing`.
///
/// On error `existing` is not consulted, so the caller's collection stays
/// as it was.
pub fn import(
    existing: &[TimeEntry],
    buffer: &str,
    mode: ImportMode,
) -> Result<MergeOutcome, ImportFormatError> {
    let incoming = parse_import(buffer)?;
    Ok(merge_or_replace(existing, incoming, mode))
}

/// Pretty-printed JSON array of the collection, in collection order.
pub fn export_json(entries: &[TimeEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(entries)
}

/// File name for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("work-hours-{}.json", date.format("%Y-%m-%d"))
}
