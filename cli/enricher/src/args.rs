//! CLI argument definitions for te-enricher.

use clap::Parser;
use std::path::PathBuf;
use te_cli_common::{default_threads, parse_positive_usize, LogLevel};

/// Fills in missing `traceCode` / `slug` span attributes from a CSV reference table.
///
/// Reads trace batches as NDJSON (one batch object per line), enriches every
/// span, and writes the batches to stdout in input order.
///
/// ## Examples
///
/// Enrich a file of batches:
///   te-enricher --csv-file-path trace_codes.csv -i spans.ndjson > enriched.ndjson
///
/// Use a JSON config file and read from stdin:
///   cat spans.ndjson | te-enricher --config enricher.json
#[derive(Parser, Debug)]
#[command(name = "te-enricher")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Reference Table ===
    /// CSV reference file with `traceCode` and `slug` columns (overrides --config)
    #[arg(long, env = "TE_CSV_FILE_PATH")]
    pub csv_file_path: Option<String>,

    /// JSON config file, e.g. {"csv_file_path": "trace_codes.csv"}
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    // === Input ===
    /// NDJSON input file, or `-` for stdin
    #[arg(short = 'i', long, default_value = "-")]
    pub input: String,

    // === Processing ===
    /// Number of enrichment threads (must be >= 1)
    #[arg(short = 't', long, default_value_t = default_threads(), value_parser = parse_positive_usize)]
    pub threads: usize,

    // === Logging ===
    /// Log level
    #[arg(short = 'l', long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
