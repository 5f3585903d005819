//! CSV loading for the reference table.

use crate::ReferenceTable;
use std::path::Path;
use te_error::{ReferenceError, Result};
use tracing::info;

/// Header name of the trace code column.
pub const TRACE_CODE_COLUMN: &str = "traceCode";

/// Header name of the slug column.
pub const SLUG_COLUMN: &str = "slug";

/// Loads a ReferenceTable from a local CSV file.
///
/// The table is all-or-nothing: a missing file, a header without the
/// `traceCode` or `slug` column, or any malformed data row fails the load.
pub async fn load_reference_table(path: &str) -> Result<ReferenceTable> {
    if path.trim().is_empty() {
        return Err(ReferenceError::Io("Reference file path is empty".to_string()).into());
    }

    let content = load_from_file(path).await?;
    let table = parse_reference_csv(&content)?;

    info!(
        source = %path,
        rows_loaded = table.rows_loaded(),
        rows_skipped = table.rows_skipped(),
        trace_codes = table.forward_len(),
        slugs = table.reverse_len(),
        "Loaded reference table"
    );

    Ok(table)
}

/// Builds a ReferenceTable from CSV text.
///
/// Rows with an empty trace code or slug are skipped and counted. A quote
/// inside an unquoted field is kept as a literal character.
pub fn parse_reference_csv(content: &str) -> Result<ReferenceTable> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ReferenceError::Parse(format!("Failed to parse CSV headers: {e}")))?
        .clone();

    let trace_code_idx = column_index(&headers, TRACE_CODE_COLUMN)?;
    let slug_idx = column_index(&headers, SLUG_COLUMN)?;

    let mut table = ReferenceTable::new();

    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            // +2 for 1-indexed and header row
            let line = e.position().map_or(row as u64 + 2, |p| p.line());
            ReferenceError::Parse(format!("Malformed row at line {line}: {e}"))
        })?;

        let trace_code = record.get(trace_code_idx).unwrap_or("");
        let slug = record.get(slug_idx).unwrap_or("");

        if trace_code.is_empty() || slug.is_empty() {
            table.record_skipped();
            continue;
        }

        table.insert(trace_code, slug);
    }

    Ok(table)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        ReferenceError::Schema(format!(
            "Column '{}' not found in CSV headers: {:?}",
            name,
            headers.iter().collect::<Vec<_>>()
        ))
        .into()
    })
}

async fn load_from_file(path: &str) -> Result<String> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(ReferenceError::NotFound(path.display().to_string()).into());
    }

    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ReferenceError::Io(format!("Failed to read {}: {}", path.display(), e)).into())
}
