//! Availability entries.
//!
//! An entry is one person's availability status for one calendar day. Entries
//! are identified by `(date, name)`; there is at most one entry per key.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// Availability status for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Maybe,
    No,
    IfNeedBe,
    Yes,
}

impl EntryType {
    pub const ALL: [EntryType; 4] = [
        EntryType::Maybe,
        EntryType::No,
        EntryType::IfNeedBe,
        EntryType::Yes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Maybe => "maybe",
            EntryType::No => "no",
            EntryType::IfNeedBe => "ifneedbe",
            EntryType::Yes => "yes",
        }
    }

    /// Background colour used when displaying an entry of this type.
    pub fn color(&self) -> &'static str {
        match self {
            EntryType::Maybe => "#ccc",
            EntryType::No => "#e81224",
            EntryType::IfNeedBe => "#fff100",
            EntryType::Yes => "#16c60c",
        }
    }

    /// Text colour that stays readable on top of [`EntryType::color`].
    pub fn text_color(&self) -> &'static str {
        match self {
            EntryType::No => "#fff",
            _ => "#000",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        EntryType::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| {
                SchedulerError::Validation(format!(
                    "Unknown status '{}'. Expected one of: maybe, no, ifneedbe, yes",
                    s
                ))
            })
    }
}

/// Identity of an entry: one per person per day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey {
    pub date: NaiveDate,
    pub name: String,
}

impl EntryKey {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        EntryKey {
            date,
            name: name.into(),
        }
    }
}

/// Composite id `"<date>-<name>"`.
impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.date.format("%Y-%m-%d"), self.name)
    }
}

/// One availability entry as exchanged with the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub date: NaiveDate,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryType,
}

impl Entry {
    pub fn new(date: NaiveDate, name: impl Into<String>, kind: EntryType) -> Self {
        Entry {
            date,
            name: name.into(),
            kind,
        }
    }

    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.date, self.name.clone())
    }

    pub fn id(&self) -> String {
        self.key().to_string()
    }

    /// Sort key used when several entries share a day.
    pub fn sort_title(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, SchedulerError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        SchedulerError::Validation(format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
    })
}
