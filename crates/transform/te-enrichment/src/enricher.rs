//! TraceEnricher - fills in `traceCode` / `slug` span attributes.

use crate::loader::{load_reference_table, SLUG_COLUMN, TRACE_CODE_COLUMN};
use crate::{EnricherConfig, ReferenceTable};
use std::sync::Arc;
use te_error::Result;
use te_traits::SpanProcessor;
use te_types::{Attributes, TraceBatch};
use tracing::debug;

/// Span attribute carrying the trace code.
pub const TRACE_CODE_ATTRIBUTE: &str = TRACE_CODE_COLUMN;

/// Span attribute carrying the slug.
pub const SLUG_ATTRIBUTE: &str = SLUG_COLUMN;

/// Processor type name under which pipelines refer to this stage.
pub const PROCESSOR_NAME: &str = "traceenrichment";

/// Enriches spans from a reference table, in both directions.
///
/// The table is loaded once and held as an immutable shared snapshot.
/// Cloning the enricher is cheap and every clone reads the same table,
/// so worker threads can each hold one without any locking.
#[derive(Debug, Clone)]
pub struct TraceEnricher {
    table: Arc<ReferenceTable>,
}

impl TraceEnricher {
    /// Wraps an already built table.
    pub fn new(table: ReferenceTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Validates the configuration and loads the reference table it names.
    pub async fn load(config: &EnricherConfig) -> Result<Self> {
        config.validate()?;
        debug!(csv_file_path = %config.csv_file_path, "Creating TraceEnricher");
        Self::from_path(&config.csv_file_path).await
    }

    /// Loads the reference table from a CSV file.
    pub async fn from_path(path: &str) -> Result<Self> {
        let table = load_reference_table(path).await?;
        Ok(Self::new(table))
    }

    /// Returns the reference table.
    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    /// Looks up the slug for a trace code.
    pub fn lookup_slug(&self, trace_code: &str) -> Option<&str> {
        self.table.slug_for(trace_code)
    }

    /// Looks up the trace code for a slug.
    pub fn lookup_trace_code(&self, slug: &str) -> Option<&str> {
        self.table.trace_code_for(slug)
    }

    /// Fills in whichever of `traceCode` / `slug` is missing.
    ///
    /// Attributes already present are never overwritten, and a value missing
    /// from the table adds nothing. Non-string values are looked up by their
    /// string rendering.
    pub fn enrich_one(&self, attrs: &mut Attributes) -> EnrichOutcome {
        let mut outcome = EnrichOutcome::default();

        if !attrs.contains_key(SLUG_ATTRIBUTE) {
            let slug = attrs
                .get(TRACE_CODE_ATTRIBUTE)
                .and_then(|code| self.table.slug_for(&code.to_str()));

            if let Some(slug) = slug {
                attrs.insert(SLUG_ATTRIBUTE, slug);
                outcome.slug_added = true;
            }
        }

        // Sees the result of the first step: a freshly added slug means
        // traceCode was already present.
        if !attrs.contains_key(TRACE_CODE_ATTRIBUTE) {
            let trace_code = attrs
                .get(SLUG_ATTRIBUTE)
                .and_then(|slug| self.table.trace_code_for(&slug.to_str()));

            if let Some(trace_code) = trace_code {
                attrs.insert(TRACE_CODE_ATTRIBUTE, trace_code);
                outcome.trace_code_added = true;
            }
        }

        outcome
    }

    /// Enriches every span of a batch in place.
    pub fn enrich_batch(&self, batch: &mut TraceBatch) -> EnrichStats {
        let mut stats = EnrichStats::default();

        for span in batch.spans_mut() {
            stats.record(self.enrich_one(&mut span.attributes));
        }

        debug!(
            spans = stats.spans,
            slugs_added = stats.slugs_added,
            trace_codes_added = stats.trace_codes_added,
            "Enriched batch"
        );

        stats
    }

    /// Enriches a batch and hands it back. Never fails.
    pub fn process_batch(&self, mut batch: TraceBatch) -> TraceBatch {
        self.enrich_batch(&mut batch);
        batch
    }
}

impl SpanProcessor for TraceEnricher {
    fn process(&self, batch: TraceBatch) -> Result<TraceBatch> {
        Ok(self.process_batch(batch))
    }

    fn name(&self) -> &str {
        PROCESSOR_NAME
    }
}

/// What a single [`TraceEnricher::enrich_one`] call added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichOutcome {
    pub slug_added: bool,
    pub trace_code_added: bool,
}

impl EnrichOutcome {
    /// Returns true if nothing was added.
    pub fn is_unchanged(&self) -> bool {
        !self.slug_added && !self.trace_code_added
    }
}

/// Counters over one or more enriched batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichStats {
    /// Spans seen
    pub spans: u64,

    /// Spans that received a `slug`
    pub slugs_added: u64,

    /// Spans that received a `traceCode`
    pub trace_codes_added: u64,
}

impl EnrichStats {
    /// Counts one span's outcome.
    pub fn record(&mut self, outcome: EnrichOutcome) {
        self.spans += 1;
        self.slugs_added += u64::from(outcome.slug_added);
        self.trace_codes_added += u64::from(outcome.trace_code_added);
    }

    /// Adds another set of counters into this one.
    pub fn merge(&mut self, other: &EnrichStats) {
        self.spans += other.spans;
        self.slugs_added += other.slugs_added;
        self.trace_codes_added += other.trace_codes_added;
    }
}
