//! te-enricher CLI
//!
//! Trace code / slug enrichment for NDJSON trace batches.

use clap::Parser;
use te_cli_common::{format_number, format_rate, init_logging};

mod args;
mod run;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Initialize logging (to stderr, so stdout is clean for output)
    init_logging(args.log_level)?;

    let summary = run::execute(args, std::io::stdout().lock()).await?;

    let secs = summary.duration().num_milliseconds() as f64 / 1000.0;

    // Report results to stderr
    eprintln!();
    eprintln!("Enrichment completed:");
    eprintln!("  Batches:           {}", format_number(summary.batches));
    eprintln!("  Spans:             {}", format_number(summary.stats.spans));
    eprintln!("  Slugs added:       {}", format_number(summary.stats.slugs_added));
    eprintln!(
        "  Trace codes added: {}",
        format_number(summary.stats.trace_codes_added)
    );
    eprintln!("  Duration:          {:.2}s", secs);
    eprintln!(
        "  Throughput:        {} spans",
        format_rate(summary.stats.spans, secs)
    );

    Ok(())
}
