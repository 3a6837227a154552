//! Commit History Goldmine
//!
//! Reads a commit-history export, classifies every changed file, prints the
//! cleaned table and optionally writes charts and a JSON dump.

use anyhow::{anyhow, Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use goldmine::analysis::{clean_log, parse_git_log, ParseOptions};
use goldmine::config::Config;
use goldmine::logging::init_logger;
use goldmine::plotting::Charts;
use goldmine::report::format_table;

#[derive(Parser, Debug)]
#[command(name = "goldmine", version, about = "Mine a commit-history export for technology and component trends")]
struct Cli {
    /// Path to the git log export
    log_file: PathBuf,

    /// TOML file overriding the technology, component and cleaning tables
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write PNG charts into this directory
    #[arg(long, value_name = "DIR")]
    charts: Option<PathBuf>,

    /// Write the cleaned table as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Fill Deleted from the added count, matching older exports
    #[arg(long)]
    legacy_deleted: bool,

    /// Number of files on the most-changed chart
    #[arg(long, value_name = "N", default_value_t = 50)]
    top_files: usize,

    /// Number of rows shown in the table preview
    #[arg(long, value_name = "N", default_value_t = 10)]
    rows: usize,

    /// Verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all logging
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::MissingRequiredArgument => {
            println!("Please provide a path to the git log file.");
            println!("{}", Cli::command().render_usage());
            return ExitCode::FAILURE;
        }
        Err(err) => err.exit(),
    };

    init_logger(cli.verbose, cli.quiet);

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    let options = ParseOptions {
        deleted_from_added: cli.legacy_deleted,
    };

    let rows = parse_git_log(&cli.log_file, &options)
        .with_context(|| format!("failed to parse {}", cli.log_file.display()))?;
    let rows = config.classifier().classify(rows);
    let rows = clean_log(rows, &config.clean);

    print!("{}", format_table(&rows, cli.rows));

    if let Some(path) = &cli.json {
        let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &rows)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Wrote {} rows to {}", rows.len(), path.display());
    }

    if let Some(dir) = &cli.charts {
        let charts = Charts {
            top_changed_files: cli.top_files,
            ..Charts::default()
        };
        let written = charts
            .render_all(&rows, dir)
            .map_err(|err| anyhow!(err).context("failed to render charts"))?;
        for path in written {
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}
