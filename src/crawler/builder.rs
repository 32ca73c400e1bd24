//! Directory builder - two-level build orchestration
//!
//! This module walks the site in two levels:
//! - Fetch the index page and extract one link per state
//! - Fetch each state page in order, extract the election authority link,
//!   derive the COVID-19 URL and resolve the abbreviation
//!
//! Pages are fetched strictly one after another through the shared cache.

use crate::cache::CacheStore;
use crate::config::ErrorPolicy;
use crate::crawler::fetcher::{FetchStats, Fetcher};
use crate::crawler::parser::{
    extract_election_authority_link, extract_index_links, ExtractError, StateLink,
};
use crate::state::{AbbreviationTable, State, StateDirectory};
use crate::url::{LinkError, SiteUrls};
use crate::VoteError;
use serde::Serialize;

/// A state left out of the directory under the `skip` policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedState {
    pub name: String,
    pub reason: String,
}

/// Result of one directory build
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Every state that was built successfully
    pub directory: StateDirectory,

    /// States excluded by the `skip` policy, in index order
    pub skipped: Vec<SkippedState>,

    /// Cache hits and network fetches made by the build
    pub fetch_stats: FetchStats,
}

impl BuildReport {
    /// True when no state was skipped
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Assembles a [`StateDirectory`] from the index and state pages
pub struct DirectoryBuilder<'a> {
    fetcher: &'a Fetcher,
    urls: SiteUrls,
    abbreviations: AbbreviationTable,
    policy: ErrorPolicy,
}

impl<'a> DirectoryBuilder<'a> {
    /// Creates a builder with the `abort` policy
    pub fn new(fetcher: &'a Fetcher, urls: SiteUrls, abbreviations: AbbreviationTable) -> Self {
        Self {
            fetcher,
            urls,
            abbreviations,
            policy: ErrorPolicy::Abort,
        }
    }

    /// Sets how per-state failures are handled
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Runs the build against `cache`
    ///
    /// # Errors
    ///
    /// Fetch, HTTP status, URL and cache errors always abort. Extraction
    /// (including a state link to another host) and unknown-state errors abort under `ErrorPolicy::Abort`; under
    /// `ErrorPolicy::Skip` they exclude that one state and are listed in
    /// [`BuildReport::skipped`].
    pub async fn build(&self, cache: &mut CacheStore) -> Result<BuildReport, VoteError> {
        let before = self.fetcher.stats();
        let index_url = self.urls.index_url().to_string();

        tracing::info!("Fetching state index from {}", index_url);
        let index_html = self.fetcher.fetch(&index_url, cache).await?;
        let links = extract_index_links(&index_html);

        if links.is_empty() {
            tracing::warn!(
                "No state links found on {}; the page layout may have changed",
                index_url
            );
        } else {
            tracing::info!("Found {} state links", links.len());
        }

        let mut report = BuildReport::default();

        for link in &links {
            match self.build_state(link, cache).await {
                Ok(state) => {
                    tracing::debug!("Built {} ({})", state.name(), state.abbreviation());
                    if report.directory.insert(state).is_some() {
                        tracing::warn!("State '{}' listed twice; keeping the later entry", link.name);
                    }
                }
                Err(e) if self.policy == ErrorPolicy::Skip && e.is_state_local() => {
                    tracing::warn!("Skipping {}: {}", link.name, e);
                    report.skipped.push(SkippedState {
                        name: link.name.clone(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    tracing::error!("Build aborted at {}: {}", link.name, e);
                    return Err(e);
                }
            }
        }

        let after = self.fetcher.stats();
        report.fetch_stats = FetchStats {
            hits: after.hits - before.hits,
            misses: after.misses - before.misses,
        };

        tracing::info!(
            "Built {} states ({} skipped, {} cache hits, {} fetched)",
            report.directory.len(),
            report.skipped.len(),
            report.fetch_stats.hits,
            report.fetch_stats.misses
        );

        Ok(report)
    }

    async fn build_state(&self, link: &StateLink, cache: &mut CacheStore) -> Result<State, VoteError> {
        let state_url = self.urls.resolve_link(&link.href).map_err(|e| match e {
            LinkError::Parse(source) => VoteError::UrlParse(source),
            LinkError::ForeignOrigin { href, .. } => VoteError::Extraction {
                state: link.name.clone(),
                source: ExtractError::ForeignLink { href },
            },
        })?;
        let html = self.fetcher.fetch(&state_url, cache).await?;

        let election_url =
            extract_election_authority_link(&html).map_err(|source| VoteError::Extraction {
                state: link.name.clone(),
                source,
            })?;
        let covid_url = self.urls.covid_url(&link.name);

        State::new(
            link.name.as_str(),
            state_url,
            covid_url,
            election_url,
            &self.abbreviations,
        )
    }
}
