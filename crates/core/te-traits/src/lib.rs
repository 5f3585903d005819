//! Core traits for trace-enrich.
//!
//! This crate defines the seam between the pipeline host and its stages:
//! - [`SpanProcessor`] - Trait for span batch processors (enrichment)

pub mod processor;

pub use processor::*;
