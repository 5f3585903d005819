//! Core types for trace-enrich.
//!
//! This crate provides the span data model that flows through the pipeline:
//! - [`TraceBatch`] - One processing cycle: resource span groups, scope span groups, spans
//! - [`Span`] - A single unit of work with its [`Attributes`]
//! - [`AttributeValue`] - String, bool, integer or double attribute values

pub mod attributes;
pub mod batch;

pub use attributes::*;
pub use batch::*;
