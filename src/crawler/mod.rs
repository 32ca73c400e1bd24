//! Crawler module for fetching pages and building the state directory
//!
//! This module contains the core build logic, including:
//! - Cache-backed HTTP fetching
//! - HTML extraction of state links and election authority links
//! - Two-level directory assembly

mod builder;
mod fetcher;
mod parser;

pub use builder::{BuildReport, DirectoryBuilder, SkippedState};
pub use fetcher::{build_http_client, FetchStats, Fetcher};
pub use parser::{
    extract_election_authority_link, extract_index_links, normalize_state_name, ExtractError,
    StateLink, INDEX_LINK_SELECTOR, OFFSITE_LINK_SELECTOR,
};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::state::AbbreviationTable;
use crate::url::SiteUrls;
use crate::VoteError;

/// Builds the state directory for a configuration
///
/// This is the main entry point for a build. It will:
/// 1. Build the HTTP client from the user agent and timeout settings
/// 2. Resolve the site URLs
/// 3. Merge the abbreviation overrides into the built-in table
/// 4. Fetch and extract the index and every state page through `cache`
///
/// # Arguments
///
/// * `config` - The validated configuration
/// * `cache` - The page cache, loaded at startup and owned by the caller
///
/// # Returns
///
/// * `Ok(BuildReport)` - The directory and any skipped states
/// * `Err(VoteError)` - The build was aborted
pub async fn build_directory(
    config: &Config,
    cache: &mut CacheStore,
) -> Result<BuildReport, VoteError> {
    let fetcher = Fetcher::from_config(&config.user_agent, &config.http)?;
    let urls = SiteUrls::new(&config.site)?;
    let abbreviations = AbbreviationTable::us_states().with_overrides(&config.abbreviations);

    DirectoryBuilder::new(&fetcher, urls, abbreviations)
        .with_policy(config.build.on_state_error)
        .build(cache)
        .await
}
