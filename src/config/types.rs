use serde::Deserialize;
use std::collections::HashMap;

/// Main configuration structure for vote-directory
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub http: HttpConfig,
    pub cache: CacheConfig,
    pub build: BuildConfig,
    /// Extra or overriding entries for the abbreviation table
    pub abbreviations: HashMap<String, String>,
}

/// Source site layout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site origin (scheme, host, optional port; no path), used to resolve
    /// state links
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the page listing every state
    #[serde(rename = "index-path")]
    pub index_path: String,

    /// Path of the COVID-19 page; state sections are fragments on it
    #[serde(rename = "covid-path")]
    pub covid_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.vote.org".to_string(),
            index_path: "/".to_string(),
            covid_path: "/covid-19/".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "vote-directory".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/vote-directory/vote-directory".to_string(),
            contact_email: "maintainers@vote-directory.dev".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// HTTP client limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// TCP/TLS connect timeout in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Page cache location
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Path of the JSON cache file
    pub path: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: "cache.json".to_string(),
        }
    }
}

/// Directory build behaviour
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    #[serde(rename = "on-state-error")]
    pub on_state_error: ErrorPolicy,
}

/// What to do when a single state cannot be built
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Fail the whole build on the first bad state
    #[default]
    Abort,
    /// Leave the state out and report it as skipped
    Skip,
}
