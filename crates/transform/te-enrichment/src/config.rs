//! Configuration for the trace enricher.

use serde::{Deserialize, Serialize};
use te_error::{ReferenceError, Result, TeError};

/// Configuration for a [`crate::TraceEnricher`].
///
/// The default value has an empty path and fails validation: an enricher
/// without a reference table would never enrich anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnricherConfig {
    /// Path of the CSV reference file with `traceCode` and `slug` columns.
    #[serde(default)]
    pub csv_file_path: String,
}

impl EnricherConfig {
    /// Creates a config pointing at a reference file.
    pub fn new(csv_file_path: impl Into<String>) -> Self {
        Self {
            csv_file_path: csv_file_path.into(),
        }
    }

    /// Parses a JSON config document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| TeError::Config(format!("Invalid enricher config: {e}")))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.csv_file_path.trim().is_empty() {
            return Err(ReferenceError::Io("csv_file_path is not set".to_string()).into());
        }
        Ok(())
    }
}
