//! CLI filter: merge Ledger journals.
//!
//! Entries marked with the mirror code are removed and the rest are sorted
//! by date ascending. Only dated entries are kept; comments, directives and
//! automatic transactions of the input journals are dropped.
//!
//! # Usage
//!
//! ```bash
//! cat *.journal | mrglent > merged.journal
//! mrglent current.journal savings.journal > merged.journal
//! ```

use std::{
    fs::File,
    io::{BufReader, BufWriter, stdin, stdout},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trn::prelude::*;

/// Merge Ledger journals: drop mirror entries, sort the rest by date.
#[derive(Parser, Debug)]
#[command(name = "mrglent")]
#[command(version, about)]
struct Args {
    /// Journal files. If none are given, reads from stdin.
    files: Vec<PathBuf>,

    /// Transaction code that marks mirror entries.
    #[arg(short, long, default_value = MIRROR_CODE)]
    mirror_code: String,
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr; stdout carries data only.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run() -> Result<()> {
    let args = Args::parse();

    let mut journal = if args.files.is_empty() {
        Journal::parse(stdin().lock()).context("Failed to parse journal from stdin")?
    } else {
        read_journals(&args.files)?
    };

    let count = merge(&mut journal, &args.mirror_code);
    journal.write_to(BufWriter::new(stdout().lock())).context("Failed to write journal")?;
    info!(count, "entries written");

    Ok(())
}

/// Concatenates journal files in the given order.
fn read_journals(paths: &[PathBuf]) -> Result<Journal> {
    let mut journal = Journal::default();
    for path in paths {
        let file = File::open(path)
            .with_context(|| format!("Failed to open journal: {}", path.display()))?;
        let part = Journal::parse(BufReader::new(file))
            .with_context(|| format!("Failed to parse journal: {}", path.display()))?;
        journal.append(part);
    }
    Ok(journal)
}

/// Removes mirror entries and orders the rest by date. Returns the number of entries kept.
fn merge(journal: &mut Journal, mirror_code: &str) -> usize {
    journal.demirror(mirror_code);
    journal.sort_by_date();
    journal.len()
}
