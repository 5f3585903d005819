//! Span batch types.
//!
//! A [`TraceBatch`] mirrors the OTLP trace layout: spans grouped by
//! instrumentation scope, scopes grouped by resource. Processors receive
//! the batch by value and hand it back, mutating span attributes in place.

use crate::Attributes;
use serde::{Deserialize, Serialize};

/// All spans handed to a processor in one cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceBatch {
    /// Span groups keyed by the resource that produced them
    #[serde(default)]
    pub resource_spans: Vec<ResourceSpans>,
}

impl TraceBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of spans across all groups.
    pub fn span_count(&self) -> usize {
        self.resource_spans
            .iter()
            .flat_map(|rs| rs.scope_spans.iter())
            .map(|ss| ss.spans.len())
            .sum()
    }

    /// Iterates over every span in the batch.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.resource_spans
            .iter()
            .flat_map(|rs| rs.scope_spans.iter())
            .flat_map(|ss| ss.spans.iter())
    }

    /// Iterates mutably over every span, leaving the grouping untouched.
    pub fn spans_mut(&mut self) -> impl Iterator<Item = &mut Span> {
        self.resource_spans
            .iter_mut()
            .flat_map(|rs| rs.scope_spans.iter_mut())
            .flat_map(|ss| ss.spans.iter_mut())
    }
}

/// Spans produced by a single resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpans {
    #[serde(default)]
    pub resource: Resource,

    #[serde(default)]
    pub scope_spans: Vec<ScopeSpans>,
}

/// The entity producing telemetry (service, host, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub attributes: Attributes,
}

/// Spans produced by a single instrumentation scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeSpans {
    #[serde(default)]
    pub scope: InstrumentationScope,

    #[serde(default)]
    pub spans: Vec<Span>,
}

/// Instrumentation library identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentationScope {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A single recorded unit of work in a trace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    /// Hex-encoded 16-byte trace id
    #[serde(default)]
    pub trace_id: String,

    /// Hex-encoded 8-byte span id
    #[serde(default)]
    pub span_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub start_time_unix_nano: u64,

    #[serde(default)]
    pub end_time_unix_nano: u64,

    #[serde(default)]
    pub attributes: Attributes,
}

impl Span {
    /// Creates a span with the given name and no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the span's attributes.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}

impl From<Vec<Span>> for TraceBatch {
    /// Wraps spans in a single resource and scope group.
    fn from(spans: Vec<Span>) -> Self {
        Self {
            resource_spans: vec![ResourceSpans {
                resource: Resource::default(),
                scope_spans: vec![ScopeSpans {
                    scope: InstrumentationScope::default(),
                    spans,
                }],
            }],
        }
    }
}
