//! ReferenceTable - bidirectional trace code / slug lookup.

use ahash::RandomState;
use hashbrown::HashMap;

/// Bidirectional lookup between trace codes and slugs.
///
/// Both directions are filled from the same record stream. A later record
/// overwrites an earlier one per direction independently, so duplicate keys
/// in the source can leave the two maps out of step with each other.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    /// traceCode -> slug
    forward: HashMap<String, String, RandomState>,

    /// slug -> traceCode
    reverse: HashMap<String, String, RandomState>,

    /// Data rows that produced a mapping.
    rows_loaded: usize,

    /// Data rows skipped for an empty trace code or slug.
    rows_skipped: usize,
}

impl ReferenceTable {
    /// Creates a new empty table.
    pub fn new() -> Self {
        Self {
            forward: HashMap::with_hasher(RandomState::new()),
            reverse: HashMap::with_hasher(RandomState::new()),
            rows_loaded: 0,
            rows_skipped: 0,
        }
    }

    /// Records one trace code / slug pair in both directions.
    pub fn insert(&mut self, trace_code: impl Into<String>, slug: impl Into<String>) {
        let trace_code = trace_code.into();
        let slug = slug.into();

        self.reverse.insert(slug.clone(), trace_code.clone());
        self.forward.insert(trace_code, slug);
        self.rows_loaded += 1;
    }

    /// Counts a data row that contributed no mapping.
    pub(crate) fn record_skipped(&mut self) {
        self.rows_skipped += 1;
    }

    /// Looks up the slug for a trace code.
    pub fn slug_for(&self, trace_code: &str) -> Option<&str> {
        self.forward.get(trace_code).map(String::as_str)
    }

    /// Looks up the trace code for a slug.
    pub fn trace_code_for(&self, slug: &str) -> Option<&str> {
        self.reverse.get(slug).map(String::as_str)
    }

    /// Number of distinct trace codes.
    pub fn forward_len(&self) -> usize {
        self.forward.len()
    }

    /// Number of distinct slugs.
    pub fn reverse_len(&self) -> usize {
        self.reverse.len()
    }

    pub fn rows_loaded(&self) -> usize {
        self.rows_loaded
    }

    pub fn rows_skipped(&self) -> usize {
        self.rows_skipped
    }

    /// Returns true if no mapping was loaded.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterates over (trace code, slug) pairs in no particular order.
    pub fn forward_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.forward.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over (slug, trace code) pairs in no particular order.
    pub fn reverse_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.reverse.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self::new()
    }
}
