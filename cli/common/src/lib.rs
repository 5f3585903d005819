//! Shared utilities for trace-enrich CLI binaries.

pub mod args;
pub mod format;
pub mod logging;

pub use args::{default_threads, parse_positive_usize, LogLevel};
pub use format::{format_number, format_rate};
pub use logging::init_logging;
