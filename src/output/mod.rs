//! Output module for build results
//!
//! This module handles:
//! - Exporting the state directory as JSON
//! - Printing single records and the directory listing
//! - Cache and build statistics

mod export;
pub mod stats;

pub use export::{export_directory, render_directory_json, DirectoryExport};
pub use stats::{print_build_summary, print_cache_statistics, CacheStatistics};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
