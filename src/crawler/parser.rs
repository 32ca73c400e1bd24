//! HTML extraction for the vote.org markup
//!
//! Two structural rules, both tied to the site's current layout:
//! - The index page lists every state as `.ul-quicklinks li a`, with anchor
//!   text like "New York Election Center"
//! - Each state page links its election authority from `div.offsite-links`
//!
//! Layout drift only requires changes here; the fetcher and builder never
//! look at markup.

use scraper::{Html, Selector};
use thiserror::Error;

/// Anchors on the index page, one per state
pub const INDEX_LINK_SELECTOR: &str = ".ul-quicklinks li a";

/// Anchors in the offsite-links box of a state page
pub const OFFSITE_LINK_SELECTOR: &str = "div.offsite-links a[href]";

/// Trailing words of every index anchor ("Election Center")
const STATE_NAME_SUFFIX_WORDS: usize = 2;

/// Errors raised when required markup is missing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no element matches '{selector}'")]
    MissingElement { selector: String },

    #[error("invalid selector '{selector}'")]
    InvalidSelector { selector: String },

    #[error("state link '{href}' points outside the site")]
    ForeignLink { href: String },
}

/// A state name and the href it links to on the index page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateLink {
    /// Canonical lowercase name
    pub name: String,

    /// Raw href attribute, usually site-relative
    pub href: String,
}

/// Extracts every state link from the index page
///
/// An index with no matching anchors yields an empty list rather than an
/// error. Anchors without an href, or whose text is nothing but the suffix,
/// are skipped.
///
/// # Example
///
/// ```
/// use vote_directory::crawler::extract_index_links;
///
/// let html = r#"<ul class="ul-quicklinks">
///     <li><a href="/state/new-york/">New York Election Center</a></li>
/// </ul>"#;
/// let links = extract_index_links(html);
/// assert_eq!(links[0].name, "new york");
/// assert_eq!(links[0].href, "/state/new-york/");
/// ```
pub fn extract_index_links(html: &str) -> Vec<StateLink> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse(INDEX_LINK_SELECTOR) {
        for element in document.select(&selector) {
            let text = element.text().collect::<String>();

            let Some(href) = element.value().attr("href") else {
                tracing::debug!("Skipping index anchor without href: {:?}", text.trim());
                continue;
            };

            let name = normalize_state_name(&text);
            if name.is_empty() {
                tracing::debug!("Skipping index anchor with no state name: {:?}", text.trim());
                continue;
            }

            links.push(StateLink {
                name,
                href: href.to_string(),
            });
        }
    }

    links
}

/// Returns the href of the first offsite link on a state page
///
/// # Errors
///
/// `ExtractError::MissingElement` if the page has no `div.offsite-links`
/// or the box holds no anchor with a non-blank href.
pub fn extract_election_authority_link(html: &str) -> Result<String, ExtractError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(OFFSITE_LINK_SELECTOR).map_err(|_| {
        ExtractError::InvalidSelector {
            selector: OFFSITE_LINK_SELECTOR.to_string(),
        }
    })?;

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .find(|href| !href.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ExtractError::MissingElement {
            selector: OFFSITE_LINK_SELECTOR.to_string(),
        })
}

/// Derives a state name from index anchor text
///
/// Lowercases, splits on whitespace, drops the trailing suffix words and
/// joins the rest with single spaces.
pub fn normalize_state_name(text: &str) -> String {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let keep = words.len().saturating_sub(STATE_NAME_SUFFIX_WORDS);
    words[..keep].join(" ")
}
