//! Parser for the delimited commit-history export.
//!
//! ```text
//! BEGIN_COMMIT
//! Hash|<sha>
//! Author|<name>
//! Date|<dd-mm-yyyy HH:MM:SS>
//! Message|<text>
//! <added>\t<deleted>\t<file-path>
//! ```

use chrono::NaiveDateTime;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{GoldmineError, Result};
use crate::types::{CommitInfo, FileChangeRow};

pub const COMMIT_SENTINEL: &str = "BEGIN_COMMIT";
pub const DATE_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Columns owned by the file-change line or the classifier.
const RESERVED_KEYS: [&str; 5] = ["Added", "Deleted", "File", "Technology", "Component"];

/// Options controlling how raw values become typed columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fill `Deleted` from the raw added count, as older exports of this
    /// table did. Off by default.
    pub deleted_from_added: bool,
}

/// A row before type coercion; date parsing happens once the whole table is
/// assembled so that failures can name the row.
#[derive(Debug, Clone)]
struct RawRow {
    fields: BTreeMap<String, String>,
    added: String,
    deleted: String,
    file: String,
}

#[derive(Debug, Clone)]
struct RawFileChange {
    added: String,
    deleted: String,
    file: String,
}

#[derive(Default)]
struct BlockState {
    fields: BTreeMap<String, String>,
    changes: Vec<RawFileChange>,
    flushed_blocks: usize,
}

impl BlockState {
    fn flush(&mut self, rows: &mut Vec<RawRow>) {
        let fields = std::mem::take(&mut self.fields);
        let changes = std::mem::take(&mut self.changes);

        if fields.is_empty() {
            if !changes.is_empty() {
                warn!(
                    "Skipping {} file change(s) outside of any commit fields",
                    changes.len()
                );
            }
            return;
        }

        debug!(
            "Flushing commit {} with {} file change(s)",
            fields.get("Hash").map(String::as_str).unwrap_or("<no hash>"),
            changes.len()
        );
        self.flushed_blocks += 1;
        rows.extend(changes.into_iter().map(|change| RawRow {
            fields: fields.clone(),
            added: change.added,
            deleted: change.deleted,
            file: change.file,
        }));
    }
}

/// Read a log export from disk and parse it.
pub fn parse_git_log<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Vec<FileChangeRow>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| GoldmineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Read {} bytes from {}", text.len(), path.display());
    parse_git_log_str(&text, options)
}

/// Parse a log export held in memory into one row per (commit, file) pair.
pub fn parse_git_log_str(text: &str, options: &ParseOptions) -> Result<Vec<FileChangeRow>> {
    let mut state = BlockState::default();
    let mut raw_rows = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();

        if line == COMMIT_SENTINEL {
            state.flush(&mut raw_rows);
            continue;
        }

        if let Some((key, value)) = line.split_once('|') {
            state.fields.insert(key.to_string(), value.to_string());
        } else if line.contains('\t') {
            state.changes.push(parse_file_change(line, index + 1)?);
        }
    }
    state.flush(&mut raw_rows);

    info!(
        "Parsed {} file change rows from {} commit blocks",
        raw_rows.len(),
        state.flushed_blocks
    );
    build_table(raw_rows, options)
}

fn parse_file_change(line: &str, line_number: usize) -> Result<RawFileChange> {
    let parts: Vec<&str> = line.split('\t').collect();
    match parts.as_slice() {
        [added, deleted, file] => Ok(RawFileChange {
            added: added.to_string(),
            deleted: deleted.to_string(),
            file: file.to_string(),
        }),
        _ => Err(GoldmineError::MalformedFileChange {
            line_number,
            fields: parts.len(),
            line: line.to_string(),
        }),
    }
}

fn build_table(raw_rows: Vec<RawRow>, options: &ParseOptions) -> Result<Vec<FileChangeRow>> {
    raw_rows
        .into_iter()
        .enumerate()
        .map(|(row, raw)| {
            let added = to_numeric(&raw.added);
            let deleted = if options.deleted_from_added {
                added
            } else {
                to_numeric(&raw.deleted)
            };
            Ok(FileChangeRow {
                commit: commit_info(row, raw.fields)?,
                added,
                deleted,
                file: raw.file,
            })
        })
        .collect()
}

fn commit_info(row: usize, mut fields: BTreeMap<String, String>) -> Result<CommitInfo> {
    let raw_date = fields
        .remove("Date")
        .ok_or(GoldmineError::MissingDate { row })?;
    let date = parse_date(&raw_date).map_err(|source| GoldmineError::InvalidDate {
        row,
        value: raw_date.clone(),
        source,
    })?;

    let hash = fields.remove("Hash");
    let author = fields.remove("Author");
    let message = fields.remove("Message");
    fields.retain(|key, _| !RESERVED_KEYS.contains(&key.as_str()));

    Ok(CommitInfo {
        hash,
        author,
        date,
        message,
        extra: fields,
    })
}

/// The year must have exactly four digits; chrono's `%Y` alone accepts shorter ones.
fn parse_date(raw: &str) -> std::result::Result<NaiveDateTime, Option<chrono::ParseError>> {
    let four_digit_year = raw
        .split(' ')
        .next()
        .and_then(|day| day.split('-').nth(2))
        .is_some_and(|year| year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()));
    if !four_digit_year {
        return Err(None);
    }
    NaiveDateTime::parse_from_str(raw, DATE_FORMAT).map_err(Some)
}

fn to_numeric(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
