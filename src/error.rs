use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, parsing or classifying a commit log.
#[derive(Debug, Error)]
pub enum GoldmineError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "malformed file-change line {line_number}: expected 3 tab-separated fields, found {fields}: {line:?}"
    )]
    MalformedFileChange {
        line_number: usize,
        fields: usize,
        line: String,
    },

    #[error("row {row}: commit has no Date field")]
    MissingDate { row: usize },

    #[error("row {row}: invalid Date {value:?}, expected dd-mm-yyyy HH:MM:SS")]
    InvalidDate {
        row: usize,
        value: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, GoldmineError>;
