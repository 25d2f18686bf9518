//! Output module for exporting fetched metadata
//!
//! This module handles:
//! - JSON export of the full record list
//! - CSV export with a fixed column order
//! - Markdown summaries of an analysis run
//! - Result statistics for display

mod json;
mod markdown;
pub mod stats;
mod tabular;

pub use json::{to_json_string, write_json};
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{print_statistics, ResultStatistics};
pub use tabular::{to_csv_string, write_csv, CSV_HEADERS};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to format output: {0}")]
    Format(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
