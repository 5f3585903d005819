//! Error types for trace-enrich.
//!
//! This crate provides:
//! - [`TeError`] - Top-level error enum for all construction-time errors
//! - [`ReferenceError`] - Errors raised while loading a reference table
//! - [`ReferenceErrorKind`] for callers that only care about the error class
//!
//! Enrichment itself has no error type. A lookup miss is a no-op, not a failure.

use thiserror::Error;

/// Top-level error type for trace-enrich.
#[derive(Error, Debug)]
pub enum TeError {
    /// Reference table errors (file access, header schema, row parsing)
    #[error("Reference table error: {0}")]
    Reference(#[from] ReferenceError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TeError {
    /// Returns the reference error class, if this is a reference table error.
    pub fn reference_kind(&self) -> Option<ReferenceErrorKind> {
        match self {
            Self::Reference(e) => Some(e.kind()),
            _ => None,
        }
    }
}

/// Reference table loading errors.
///
/// Every variant is fatal to construction: a reference table is loaded
/// completely or not at all.
#[derive(Error, Debug)]
pub enum ReferenceError {
    /// File not found
    #[error("File not found: {0}")]
    NotFound(String),

    /// File could not be opened or read to completion
    #[error("I/O error: {0}")]
    Io(String),

    /// Required header column missing
    #[error("Schema error: {0}")]
    Schema(String),

    /// Malformed data row
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ReferenceError {
    /// Classifies the error. `NotFound` belongs to the I/O class.
    pub fn kind(&self) -> ReferenceErrorKind {
        match self {
            Self::NotFound(_) | Self::Io(_) => ReferenceErrorKind::Io,
            Self::Schema(_) => ReferenceErrorKind::Schema,
            Self::Parse(_) => ReferenceErrorKind::Parse,
        }
    }
}

/// Error class of a [`ReferenceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceErrorKind {
    /// File missing or unreadable
    Io,

    /// Required header column absent
    Schema,

    /// Malformed row or truncated read
    Parse,
}

impl std::fmt::Display for ReferenceErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io => write!(f, "Io"),
            Self::Schema => write!(f, "Schema"),
            Self::Parse => write!(f, "Parse"),
        }
    }
}

/// Result type alias using TeError.
pub type Result<T> = std::result::Result<T, TeError>;
