//! Plain-text preview of a classified table.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::types::ClassifiedRow;

const BASE_COLUMNS: [&str; 9] = [
    "Hash",
    "Author",
    "Date",
    "Message",
    "Added",
    "Deleted",
    "File",
    "Technology",
    "Component",
];
const MAX_CELL_CHARS: usize = 30;
const MISSING: &str = "NaN";

/// Render the first and last `max_rows / 2` rows as an aligned table,
/// followed by a `[N rows x M columns]` footer.
pub fn format_table(rows: &[ClassifiedRow], max_rows: usize) -> String {
    let extras: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.change.commit.extra.keys().map(String::as_str))
        .collect();
    let columns: Vec<&str> = BASE_COLUMNS.iter().copied().chain(extras).collect();

    if rows.is_empty() {
        return format!("Empty table\nColumns: [{}]\n[0 rows x {} columns]\n", columns.join(", "), columns.len());
    }

    let shown: Vec<(usize, &ClassifiedRow)> = if rows.len() <= max_rows {
        rows.iter().enumerate().collect()
    } else {
        let head = max_rows.div_ceil(2);
        let tail = max_rows / 2;
        rows.iter()
            .enumerate()
            .take(head)
            .chain(rows.iter().enumerate().skip(rows.len() - tail))
            .collect()
    };
    let truncated = shown.len() < rows.len();
    let head = max_rows.div_ceil(2).min(shown.len());

    let cells: Vec<Vec<String>> = shown
        .iter()
        .map(|(_, row)| columns.iter().map(|c| clip(&cell(row, c))).collect())
        .collect();
    let index_width = shown
        .iter()
        .map(|(i, _)| i.to_string().len())
        .max()
        .unwrap_or(1);
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(c, name)| {
            cells
                .iter()
                .map(|r| r[c].chars().count())
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let _ = write!(out, "{:index_width$}", "");
    for (name, &width) in columns.iter().zip(&widths) {
        let _ = write!(out, "  {name:>width$}");
    }
    out.push('\n');

    for (n, ((index, _), row_cells)) in shown.iter().zip(&cells).enumerate() {
        if truncated && n == head {
            ellipsis(&mut out, index_width);
        }
        let _ = write!(out, "{index:<index_width$}");
        for (value, &width) in row_cells.iter().zip(&widths) {
            let _ = write!(out, "  {value:>width$}");
        }
        out.push('\n');
    }
    if truncated && head == shown.len() {
        ellipsis(&mut out, index_width);
    }

    let _ = writeln!(out, "\n[{} rows x {} columns]", rows.len(), columns.len());
    out
}

fn ellipsis(out: &mut String, index_width: usize) {
    let _ = writeln!(out, "{:index_width$}  ...", "...");
}

fn cell(row: &ClassifiedRow, column: &str) -> String {
    let commit = &row.change.commit;
    let optional = |value: Option<&String>| value.cloned().unwrap_or_else(|| MISSING.to_string());
    match column {
        "Hash" => optional(commit.hash.as_ref()),
        "Author" => optional(commit.author.as_ref()),
        "Date" => commit.date.to_string(),
        "Message" => optional(commit.message.as_ref()),
        "Added" => count(row.change.added),
        "Deleted" => count(row.change.deleted),
        "File" => row.change.file.clone(),
        "Technology" => row.technology.clone(),
        "Component" => row.component.clone(),
        extra => optional(commit.extra.get(extra)),
    }
}

fn count(value: Option<i64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

fn clip(value: &str) -> String {
    if value.chars().count() <= MAX_CELL_CHARS {
        value.to_string()
    } else {
        let head: String = value.chars().take(MAX_CELL_CHARS - 3).collect();
        format!("{head}...")
    }
}
