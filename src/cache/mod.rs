//! Page cache module
//!
//! This module persists raw response bodies keyed by request URL:
//! - One JSON object on disk, URL keys and body values
//! - Loaded once at startup; a missing or unreadable file means an empty cache
//! - Every write rewrites the whole snapshot before returning

mod store;

pub use store::{load_entries, save_entries, CacheStore};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing the cache
///
/// Reads never fail: a cache that cannot be loaded is treated as empty.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to write cache file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize cache: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;
