//! Configuration module for vote-directory
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use vote_directory::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("vote-directory.toml")).unwrap();
//! println!("Index page: {}{}", config.site.base_url, config.site.index_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BuildConfig, CacheConfig, Config, ErrorPolicy, HttpConfig, SiteConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
