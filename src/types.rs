//! # Common Types
//!
//! This module contains the row types produced by each pipeline stage and the
//! calendar periods used when bucketing rows for charts.

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Label used when no technology or component rule matches a path.
pub const OTHER: &str = "Other";

/// Fields shared by every file change of one commit block.
///
/// The four well-known keys are typed; any other `Key|Value` pair found in
/// the log is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitInfo {
    /// Commit hash (`Hash|...`)
    #[serde(rename = "Hash")]
    pub hash: Option<String>,
    /// Commit author (`Author|...`)
    #[serde(rename = "Author")]
    pub author: Option<String>,
    /// Commit timestamp (`Date|dd-mm-yyyy HH:MM:SS`)
    #[serde(rename = "Date")]
    pub date: NaiveDateTime,
    /// Commit subject (`Message|...`)
    #[serde(rename = "Message")]
    pub message: Option<String>,
    /// Log-defined fields beyond the well-known ones
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// One changed file within one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChangeRow {
    #[serde(flatten)]
    pub commit: CommitInfo,
    /// Lines added, or `None` when the raw value was not numeric
    #[serde(rename = "Added")]
    pub added: Option<i64>,
    /// Lines deleted, or `None` when the raw value was not numeric
    #[serde(rename = "Deleted")]
    pub deleted: Option<i64>,
    /// Path of the changed file
    #[serde(rename = "File")]
    pub file: String,
}

/// A file change with its derived Technology and Component labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedRow {
    #[serde(flatten)]
    pub change: FileChangeRow,
    #[serde(rename = "Technology")]
    pub technology: String,
    #[serde(rename = "Component")]
    pub component: String,
}

impl ClassifiedRow {
    pub fn file(&self) -> &str {
        &self.change.file
    }

    pub fn author(&self) -> Option<&str> {
        self.change.commit.author.as_deref()
    }

    pub fn hash(&self) -> Option<&str> {
        self.change.commit.hash.as_deref()
    }

    pub fn date(&self) -> NaiveDateTime {
        self.change.commit.date
    }
}

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn of(date: NaiveDateTime) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A calendar quarter (1..=4), ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quarter {
    pub year: i32,
    pub quarter: u32,
}

impl Quarter {
    pub fn of(date: NaiveDateTime) -> Self {
        Self {
            year: date.year(),
            quarter: (date.month() - 1) / 3 + 1,
        }
    }

    pub fn succ(self) -> Self {
        if self.quarter == 4 {
            Self {
                year: self.year + 1,
                quarter: 1,
            }
        } else {
            Self {
                year: self.year,
                quarter: self.quarter + 1,
            }
        }
    }
}

/// Rendered as `Q<q>/<yyyy>`, the axis label used on quarterly charts.
impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}/{}", self.quarter, self.year)
    }
}
