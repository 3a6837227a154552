//! # Commit History Goldmine
//!
//! `goldmine` turns a delimited commit-history export into a table with one
//! row per changed file, labels each row with a technology (by file
//! extension) and an architectural component (by path fragment), filters out
//! noise, and renders trend and distribution charts.
//!
//! ## Pipeline
//!
//! Every stage returns a new owned table:
//!
//! 1. [`analysis::parse_git_log`] reads the export into [`FileChangeRow`]s.
//! 2. [`analysis::Classifier::classify`] adds Technology and Component.
//! 3. [`analysis::clean_log`] drops unclassified, bot and style-only rows.
//! 4. [`plotting::Charts`] draws PNG charts of the cleaned table.
//!
//! ## Example
//!
//! ```no_run
//! use goldmine::analysis::{clean_log, parse_git_log, ParseOptions};
//! use goldmine::config::Config;
//!
//! let config = Config::default();
//! let rows = parse_git_log("history.log", &ParseOptions::default())?;
//! let rows = clean_log(config.classifier().classify(rows), &config.clean);
//! println!("{}", goldmine::report::format_table(&rows, 10));
//! # Ok::<(), goldmine::GoldmineError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod logging;
pub mod plotting;
pub mod report;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use error::{GoldmineError, Result};
pub use types::{ClassifiedRow, CommitInfo, FileChangeRow, OTHER};
