//! Entry type enum as the single source of truth for type strings,
//! priorities, and labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of a time entry.
///
/// The set is closed, but stored collections may carry values written by
/// other clients. Those are kept verbatim in [`EntryType::Unrecognized`] so
/// they survive an export round-trip, and are treated like
/// [`EntryType::Normal`] everywhere a classification is computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum EntryType {
    #[default]
    Normal,
    Overtime,
    Night,
    Weekend,
    Leave,
    Unrecognized(String),
}

impl EntryType {
    /// Display priority used to pick a day's dominant type. Highest wins.
    #[must_use]
    pub const fn priority(&self) -> u8 {
        match self {
            Self::Leave => 5,
            Self::Overtime => 4,
            Self::Weekend => 3,
            Self::Night => 2,
            Self::Normal | Self::Unrecognized(_) => 1,
        }
    }

    /// Human-readable label for listings and reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Normal | Self::Unrecognized(_) => "Normal",
            Self::Overtime => "Overtime",
            Self::Night => "Night",
            Self::Weekend => "Weekend",
            Self::Leave => "Leave",
        }
    }

    /// Wire string for this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => "normal",
            Self::Overtime => "overtime",
            Self::Night => "night",
            Self::Weekend => "weekend",
            Self::Leave => "leave",
            Self::Unrecognized(raw) => raw,
        }
    }

    #[must_use]
    pub const fn is_leave(&self) -> bool {
        matches!(self, Self::Leave)
    }

    /// Whether hours of this type count toward the overtime bucket.
    ///
    /// Overtime, night, and weekend all count; leave counts toward nothing.
    #[must_use]
    pub const fn is_premium(&self) -> bool {
        matches!(self, Self::Overtime | Self::Night | Self::Weekend)
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "normal" => Self::Normal,
            "overtime" => Self::Overtime,
            "night" => Self::Night,
            "weekend" => Self::Weekend,
            "leave" => Self::Leave,
            other => Self::Unrecognized(other.to_string()),
        })
    }
}

impl Serialize for EntryType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntryType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(kind) = s.parse::<Self>();
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_all_variants() {
        let variants = [
            EntryType::Normal,
            EntryType::Overtime,
            EntryType::Night,
            EntryType::Weekend,
            EntryType::Leave,
        ];

        for variant in &variants {
            let s = variant.to_string();
            let parsed: EntryType = s.parse().unwrap();
            assert_eq!(parsed, *variant, "roundtrip failed for {variant:?}");
        }
    }

    #[test]
    fn test_unknown_type_is_kept_verbatim() {
        let parsed: EntryType = serde_json::from_str("\"astreinte\"").unwrap();
        assert_eq!(parsed, EntryType::Unrecognized("astreinte".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"astreinte\"");
    }

    #[test]
    fn test_unknown_type_behaves_like_normal() {
        let unknown = EntryType::Unrecognized("oncall".to_string());
        assert_eq!(unknown.priority(), EntryType::Normal.priority());
        assert_eq!(unknown.label(), "Normal");
        assert!(!unknown.is_premium());
        assert!(!unknown.is_leave());
    }

    #[test]
    fn test_priorities_are_ordered() {
        assert!(EntryType::Leave.priority() > EntryType::Overtime.priority());
        assert!(EntryType::Overtime.priority() > EntryType::Weekend.priority());
        assert!(EntryType::Weekend.priority() > EntryType::Night.priority());
        assert!(EntryType::Night.priority() > EntryType::Normal.priority());
    }
}
