//! vote-directory: a cached scraper for per-state voting information
//!
//! This crate fetches the vote.org state index, keeps every fetched page in a
//! JSON cache on disk, and rebuilds a typed directory of per-state records
//! (voting portal, COVID-19 info page, election authority, abbreviation).

pub mod cache;
pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for vote-directory operations
#[derive(Debug, Error)]
pub enum VoteError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Extraction failed for state '{state}': {source}")]
    Extraction {
        state: String,
        source: crawler::ExtractError,
    },

    #[error("No abbreviation known for state '{name}'")]
    UnknownState { name: String },

    #[error("Cache error: {0}")]
    CacheIo(#[from] cache::CacheError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Build interrupted")]
    Interrupted,
}

impl VoteError {
    /// Returns true for the per-state errors a `skip` policy may absorb
    pub fn is_state_local(&self) -> bool {
        matches!(self, Self::Extraction { .. } | Self::UnknownState { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for vote-directory operations
pub type Result<T> = std::result::Result<T, VoteError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use cache::CacheStore;
pub use config::Config;
pub use crawler::{build_directory, BuildReport, Fetcher};
pub use state::{AbbreviationTable, State, StateDirectory};
