//! Trace code / slug enrichment for trace-enrich pipelines.
//!
//! This crate provides:
//! - [`ReferenceTable`] - O(1) lookups between trace codes and slugs, both ways
//! - [`load_reference_table`] - Builds the table from a header-indexed CSV file
//! - [`TraceEnricher`] - Fills in the missing `traceCode` or `slug` span attribute
//!
//! # Example
//!
//! ```rust,ignore
//! use te_enrichment::{EnricherConfig, TraceEnricher};
//!
//! let config = EnricherConfig::new("/etc/te/trace_codes.csv");
//! let enricher = TraceEnricher::load(&config).await?;
//!
//! let batch = enricher.process_batch(batch);
//! ```

mod config;
mod enricher;
mod loader;
mod table;

pub use config::EnricherConfig;
pub use enricher::{
    EnrichOutcome, EnrichStats, TraceEnricher, PROCESSOR_NAME, SLUG_ATTRIBUTE,
    TRACE_CODE_ATTRIBUTE,
};
pub use loader::{load_reference_table, parse_reference_csv, SLUG_COLUMN, TRACE_CODE_COLUMN};
pub use table::ReferenceTable;
