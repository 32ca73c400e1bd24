//! URL derivation for vote-directory
//!
//! Every URL a build produces comes from the configured site origin:
//! - the index page (`base-url` + `index-path`)
//! - state pages (hrefs from the index resolved against the origin)
//! - COVID-19 sections (`base-url` + `covid-path`, fragment = state slug)

use crate::config::SiteConfig;
use crate::state::slug;
use thiserror::Error;
use url::{ParseError, Url};

/// Errors raised when resolving a state link
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("URL parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("link '{href}' leaves the site origin {origin}")]
    ForeignOrigin { href: String, origin: String },
}

/// Resolved URLs for the configured site
#[derive(Debug, Clone)]
pub struct SiteUrls {
    base: Url,
    index: Url,
    covid: Url,
}

impl SiteUrls {
    /// Parses the site configuration into absolute URLs
    ///
    /// # Example
    ///
    /// ```
    /// use vote_directory::config::SiteConfig;
    /// use vote_directory::url::SiteUrls;
    ///
    /// let urls = SiteUrls::new(&SiteConfig::default()).unwrap();
    /// assert_eq!(urls.index_url(), "https://www.vote.org/");
    /// assert_eq!(urls.covid_url("new york"), "https://www.vote.org/covid-19/#new-york");
    /// ```
    pub fn new(site: &SiteConfig) -> Result<Self, ParseError> {
        let base = Url::parse(&site.base_url)?;
        let index = base.join(&site.index_path)?;
        let covid = base.join(&site.covid_path)?;
        Ok(Self { base, index, covid })
    }

    /// URL of the page listing every state
    pub fn index_url(&self) -> &str {
        self.index.as_str()
    }

    /// Resolves an href from the index page to an absolute state page URL
    ///
    /// The result always shares the base origin; an absolute or
    /// protocol-relative href naming another host is rejected.
    pub fn resolve_link(&self, href: &str) -> Result<String, LinkError> {
        let href = href.trim();
        let url = self.base.join(href)?;
        if url.origin() != self.base.origin() {
            return Err(LinkError::ForeignOrigin {
                href: href.to_string(),
                origin: self.base.origin().ascii_serialization(),
            });
        }
        Ok(url.to_string())
    }

    /// Derives the COVID-19 section URL for a canonical state name
    ///
    /// No fetch is involved; the fragment is the name with spaces replaced
    /// by hyphens.
    pub fn covid_url(&self, name: &str) -> String {
        let mut url = self.covid.clone();
        url.set_fragment(Some(&slug(name)));
        url.to_string()
    }
}
