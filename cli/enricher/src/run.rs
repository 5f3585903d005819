//! Main execution logic for te-enricher.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use std::io::Write;
use std::path::Path;
use te_enrichment::{EnrichStats, EnricherConfig, TraceEnricher};
use te_types::TraceBatch;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::args::Cli;

/// Summary of one run.
#[derive(Debug)]
pub struct RunSummary {
    pub batches: u64,
    pub stats: EnrichStats,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn duration(&self) -> Duration {
        self.completed_at - self.started_at
    }
}

/// Execute the enricher with the provided arguments, writing batches to `out`.
pub async fn execute(args: Cli, out: impl Write) -> Result<RunSummary> {
    let started_at = Utc::now();

    let config = resolve_config(&args).await?;

    // The table must be in place before any input is touched.
    let enricher = TraceEnricher::load(&config)
        .await
        .context("Failed to build trace enricher")?;

    let input = read_input(&args.input).await?;
    let mut batches = parse_batches(&input)?;

    info!(
        batches = batches.len(),
        threads = args.threads,
        "Enriching trace batches"
    );

    let stats = enrich_parallel(&enricher, &mut batches, args.threads);

    write_batches(out, &batches)?;

    Ok(RunSummary {
        batches: batches.len() as u64,
        stats,
        started_at,
        completed_at: Utc::now(),
    })
}

/// Builds the enricher config from `--config` and `--csv-file-path`.
async fn resolve_config(args: &Cli) -> Result<EnricherConfig> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path).await?,
        None => EnricherConfig::default(),
    };

    if let Some(csv_file_path) = &args.csv_file_path {
        config.csv_file_path = csv_file_path.clone();
    }

    debug!(?config, "Resolved enricher config");
    Ok(config)
}

async fn load_config_file(path: &Path) -> Result<EnricherConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    EnricherConfig::from_json(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

async fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut content = String::new();
        tokio::io::stdin()
            .read_to_string(&mut content)
            .await
            .context("Failed to read stdin")?;
        Ok(content)
    } else {
        tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("Failed to read input {input}"))
    }
}

/// Parses NDJSON trace batches, skipping blank lines.
pub fn parse_batches(input: &str) -> Result<Vec<TraceBatch>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Invalid trace batch on line {}", idx + 1))
        })
        .collect()
}

/// Enriches batches across `threads` workers sharing one table snapshot.
///
/// Batches stay in their original order.
pub fn enrich_parallel(
    enricher: &TraceEnricher,
    batches: &mut [TraceBatch],
    threads: usize,
) -> EnrichStats {
    if batches.is_empty() {
        return EnrichStats::default();
    }

    let chunk_size = batches.len().div_ceil(threads.max(1));

    std::thread::scope(|scope| {
        let workers: Vec<_> = batches
            .chunks_mut(chunk_size)
            .map(|chunk| {
                let enricher = enricher.clone();
                scope.spawn(move || {
                    let mut stats = EnrichStats::default();
                    for batch in chunk.iter_mut() {
                        stats.merge(&enricher.enrich_batch(batch));
                    }
                    stats
                })
            })
            .collect();

        let mut total = EnrichStats::default();
        for worker in workers {
            match worker.join() {
                Ok(stats) => total.merge(&stats),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        total
    })
}

/// Writes batches as NDJSON, one per line.
fn write_batches(out: impl Write, batches: &[TraceBatch]) -> Result<()> {
    let mut out = std::io::BufWriter::new(out);

    for batch in batches {
        serde_json::to_writer(&mut out, batch).context("Failed to serialize batch")?;
        out.write_all(b"\n")?;
    }

    out.flush()?;
    Ok(())
}
