use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use insightboard::filter::FilterCriteria;
use insightboard::parser;
use insightboard::store::RecordStore;
use insightboard::views;

#[derive(Parser, Debug)]
#[command(name = "insightboard")]
#[command(about = "Aggregate analytical records into dashboard view datasets", long_about = None)]
struct Args {
    /// Filter expression (e.g. 'where(sector: "Energy", end_year: 2018)')
    filter: Option<String>,

    /// Read the record snapshot from this file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,

    /// Snapshot format; inferred from the file extension when omitted
    #[arg(long, value_enum)]
    format: Option<SnapshotFormat>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Print the distinct filterable values instead of the dashboard
    #[arg(long)]
    options: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SnapshotFormat {
    Json,
    Csv,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let store = load_store(&args).context("Failed to load record snapshot")?;

    if args.options {
        return write_json(&store.filter_options(), args.pretty);
    }

    let criteria = match args.filter.as_deref().map(str::trim) {
        Some(expr) if !expr.is_empty() => match parser::parse_criteria(expr) {
            Ok((remaining, criteria)) => {
                if !remaining.trim().is_empty() {
                    eprintln!("Warning: unparsed input: '{}'", remaining);
                }
                criteria
            }
            Err(e) => {
                eprintln!("Parse error: {:?}", e);
                std::process::exit(1);
            }
        },
        _ => FilterCriteria::default(),
    };

    let dashboard = views::assemble(store.records(), &criteria);
    write_json(&dashboard, args.pretty)
}

fn load_store(args: &Args) -> Result<RecordStore> {
    let format = args.format.unwrap_or_else(|| {
        args.input
            .as_deref()
            .map(infer_format)
            .unwrap_or(SnapshotFormat::Json)
    });

    match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open '{}'", path.display()))?;
            let reader = BufReader::new(file);
            match format {
                SnapshotFormat::Json => RecordStore::from_json_reader(reader),
                SnapshotFormat::Csv => RecordStore::from_csv_reader(reader),
            }
        }
        None => {
            let stdin = io::stdin();
            let handle = stdin.lock();
            match format {
                SnapshotFormat::Json => RecordStore::from_json_reader(handle),
                SnapshotFormat::Csv => RecordStore::from_csv_reader(handle),
            }
        }
    }
}

fn infer_format(path: &Path) -> SnapshotFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => SnapshotFormat::Csv,
        _ => SnapshotFormat::Json,
    }
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(payload.as_bytes())
        .context("Failed to write output to stdout")?;
    handle
        .write_all(b"\n")
        .context("Failed to write output to stdout")?;
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}
