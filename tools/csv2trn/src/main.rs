//! CLI filter: CSV account statement → Ledger journal entries or modcsv records.
//!
//! # Usage
//!
//! ```bash
//! # Canonical records to Ledger entries
//! echo "1982-10-08,Assets:Saving,Assets:Current,DB,Daily allowance,-30,ALD" | csv2trn
//!
//! # Bank statement with its own record format, this account from the command line
//! csv2trn -f LCU.xml -t Assets:Saving -c '$' -o modcsv < LCU.csv > saving.csv
//! ```
//!
//! Records that cannot be decoded (a header line, for example) are reported
//! on stderr and skipped. Output is always in ascending date order.

use std::{
    fs::File,
    io::{BufReader, Read, Write, stdin, stdout},
    path::PathBuf,
};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use trn::prelude::*;

/// Filter financial transactions from CSV account statement records to a standard format.
#[derive(Parser, Debug)]
#[command(name = "csv2trn")]
#[command(version, about)]
struct Args {
    /// XML file with the input CSV record format. Defaults to the modcsv format.
    #[arg(short, long)]
    format: Option<PathBuf>,

    /// Account the transactions belong to, e.g. "Assets:Current".
    /// Overrides the this-account field of the records.
    #[arg(short, long)]
    this_account: Option<String>,

    /// Currency of the amounts: "$" or a currency code such as "GBP".
    #[arg(short, long)]
    currency: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputArg::Ledger)]
    output: OutputArg,

    /// Statement file. If not specified, reads from stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,
}

/// Output formats for CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputArg {
    /// Ledger journal entries.
    Ledger,
    /// Canonical CSV records: date,thisAccount,otherAccount,code,memo,amount,currency.
    #[value(alias = "csv")]
    Modcsv,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Ledger => OutputFormat::Ledger,
            OutputArg::Modcsv => OutputFormat::Csv,
        }
    }
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

    let format = match &args.format {
        Some(path) => RecordFormat::read(path)
            .with_context(|| format!("Invalid record format file: {}", path.display()))?,
        None => RecordFormat::canonical(),
    };

    let overrides = Overrides {
        this_account: args.this_account.filter(|account| !account.is_empty()),
        currency: args.currency.filter(|currency| !currency.is_empty()),
    };
    if overrides.this_account.is_none() && !format.has(Role::ThisAccount) {
        bail!(
            "Cannot get this account: the records have no {} field and --this-account is not given",
            Role::ThisAccount
        );
    }

    let input: Box<dyn Read> = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(stdin().lock()),
    };

    let count = convert(input, stdout().lock(), format, overrides, args.output.into())?;
    info!(count, "transactions written");

    Ok(())
}

/// Reads a whole statement, skipping undecodable records, and writes it
/// in ascending date order.
fn convert<R: Read, W: Write>(
    input: R,
    output: W,
    format: RecordFormat,
    overrides: Overrides,
    output_format: OutputFormat,
) -> Result<usize> {
    let reader = RecordReader::new(input, format, overrides);

    let mut txs = Vec::new();
    for result in reader {
        match result {
            Ok(tx) => txs.push(tx),
            Err(e) if e.is_recoverable() => warn!("record skipped: {e}"),
            Err(e) => return Err(e).context("Failed to read statement"),
        }
    }

    if ensure_ascending(&mut txs) {
        debug!("statement in descending date order, reversed");
    }

    let mut writer = TransactionWriter::new(output, output_format);
    writer.write_all(&txs).context("Failed to write transactions")?;
    writer.flush().context("Failed to flush output")?;

    Ok(writer.records_written())
}
