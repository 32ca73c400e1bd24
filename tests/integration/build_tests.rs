//! Integration tests for the directory build
//!
//! These tests use wiremock to serve an index page and per-state pages and
//! run the full two-level build end-to-end.

use std::path::Path;
use tempfile::TempDir;
use vote_directory::cache::{load_entries, CacheStore};
use vote_directory::config::{CacheConfig, Config, ErrorPolicy, SiteConfig};
use vote_directory::crawler::build_directory;
use vote_directory::VoteError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INDEX_HTML: &str = r#"<html><body>
    <header><a href="/register-to-vote/">Register</a></header>
    <ul class="ul-quicklinks">
        <li><a href="/ohio">Ohio Election Center</a></li>
        <li><a href="/texas">Texas Election Center</a></li>
    </ul>
</body></html>"#;

const OHIO_HTML: &str = r#"<html><body>
    <div class="offsite-links">
        <a href="https://www.ohiosos.gov/elections/">Ohio Secretary of State</a>
    </div>
</body></html>"#;

const TEXAS_HTML: &str = r#"<html><body>
    <div class="offsite-links">
        <a href="https://www.sos.texas.gov/elections/">Texas Secretary of State</a>
    </div>
</body></html>"#;

const TEXAS_NO_LINKS_HTML: &str = r#"<html><body>
    <div class="content"><p>Texas voting information</p></div>
</body></html>"#;

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, cache_path: &Path) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            ..SiteConfig::default()
        },
        cache: CacheConfig {
            path: cache_path.display().to_string(),
        },
        ..Config::default()
    }
}

async fn mount_page(server: &MockServer, page: &str, body: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_build_two_states() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", INDEX_HTML, 1).await;
    mount_page(&mock_server, "/ohio", OHIO_HTML, 1).await;
    mount_page(&mock_server, "/texas", TEXAS_HTML, 1).await;

    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.json");
    let config = create_test_config(&mock_server.uri(), &cache_path);
    let mut cache = CacheStore::load(&cache_path);

    let report = build_directory(&config, &mut cache)
        .await
        .expect("Build failed");

    let directory = &report.directory;
    assert_eq!(directory.names(), vec!["ohio", "texas"]);
    assert!(report.is_complete());

    let ohio = directory.get("ohio").unwrap();
    assert!(ohio.covid_url().ends_with("#ohio"));
    assert_eq!(ohio.abbreviation(), "OH");
    assert_eq!(ohio.state_url(), format!("{}/ohio", mock_server.uri()));
    assert_eq!(ohio.election_url(), "https://www.ohiosos.gov/elections/");

    let texas = directory.get("texas").unwrap();
    assert!(texas.covid_url().ends_with("#texas"));
    assert_eq!(texas.abbreviation(), "TX");

    assert_eq!(report.fetch_stats.misses, 3);
    assert_eq!(report.fetch_stats.hits, 0);
}

#[tokio::test]
async fn test_rebuild_is_served_from_cache() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", INDEX_HTML, 1).await;
    mount_page(&mock_server, "/ohio", OHIO_HTML, 1).await;
    mount_page(&mock_server, "/texas", TEXAS_HTML, 1).await;

    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.json");
    let config = create_test_config(&mock_server.uri(), &cache_path);

    let first = {
        let mut cache = CacheStore::load(&cache_path);
        build_directory(&config, &mut cache).await.expect("First build failed")
    };

    let mut cache = CacheStore::load(&cache_path);
    let second = build_directory(&config, &mut cache)
        .await
        .expect("Second build failed");

    assert_eq!(second.fetch_stats.misses, 0);
    assert_eq!(second.fetch_stats.hits, 3);
    assert_eq!(first.directory.names(), second.directory.names());
    assert_eq!(first.directory.get("texas"), second.directory.get("texas"));

    let entries = load_entries(&cache_path);
    assert_eq!(entries.len(), 3);
    assert!(entries.contains_key(&format!("{}/", mock_server.uri())));
    assert!(entries.contains_key(&format!("{}/texas", mock_server.uri())));
}

#[tokio::test]
async fn test_missing_offsite_link_aborts_build() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", INDEX_HTML, 1).await;
    mount_page(&mock_server, "/ohio", OHIO_HTML, 1).await;
    mount_page(&mock_server, "/texas", TEXAS_NO_LINKS_HTML, 1).await;

    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.json");
    let config = create_test_config(&mock_server.uri(), &cache_path);
    let mut cache = CacheStore::load(&cache_path);

    match build_directory(&config, &mut cache).await {
        Err(VoteError::Extraction { state, .. }) => assert_eq!(state, "texas"),
        Err(e) => panic!("expected Extraction error, got {}", e),
        Ok(report) => panic!("expected failure, got {:?}", report.directory.names()),
    }

    // Pages fetched before the failure stay cached
    assert_eq!(cache.len(), 3);
}

#[tokio::test]
async fn test_missing_offsite_link_skipped_under_skip_policy() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", INDEX_HTML, 1).await;
    mount_page(&mock_server, "/ohio", OHIO_HTML, 1).await;
    mount_page(&mock_server, "/texas", TEXAS_NO_LINKS_HTML, 1).await;

    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.json");
    let mut config = create_test_config(&mock_server.uri(), &cache_path);
    config.build.on_state_error = ErrorPolicy::Skip;
    let mut cache = CacheStore::load(&cache_path);

    let report = build_directory(&config, &mut cache)
        .await
        .expect("Build failed");

    assert_eq!(report.directory.names(), vec!["ohio"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "texas");
    assert!(report.skipped[0].reason.contains("texas"));
    assert!(!report.is_complete());
}

#[tokio::test]
async fn test_http_failure_aborts_even_under_skip_policy() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", INDEX_HTML, 1).await;
    mount_page(&mock_server, "/ohio", OHIO_HTML, 1).await;

    Mock::given(method("GET"))
        .and(path("/texas"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.json");
    let mut config = create_test_config(&mock_server.uri(), &cache_path);
    config.build.on_state_error = ErrorPolicy::Skip;
    let mut cache = CacheStore::load(&cache_path);

    match build_directory(&config, &mut cache).await {
        Err(VoteError::HttpStatus { status, url }) => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/texas"));
        }
        Err(e) => panic!("expected HttpStatus error, got {}", e),
        Ok(report) => panic!("expected failure, got {:?}", report.directory.names()),
    }

    assert!(!cache.contains(&format!("{}/texas", mock_server.uri())));
}

#[tokio::test]
async fn test_index_without_state_list_builds_empty_directory() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        "<html><body><p>Site maintenance</p></body></html>",
        1,
    )
    .await;

    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.json");
    let config = create_test_config(&mock_server.uri(), &cache_path);
    let mut cache = CacheStore::load(&cache_path);

    let report = build_directory(&config, &mut cache)
        .await
        .expect("Build failed");

    assert!(report.directory.is_empty());
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_corrupt_cache_file_starts_cold() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", INDEX_HTML, 1).await;
    mount_page(&mock_server, "/ohio", OHIO_HTML, 1).await;
    mount_page(&mock_server, "/texas", TEXAS_HTML, 1).await;

    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.json");
    std::fs::write(&cache_path, "{\"truncated\": ").unwrap();

    let config = create_test_config(&mock_server.uri(), &cache_path);
    let mut cache = CacheStore::load(&cache_path);
    assert!(cache.is_empty());

    let report = build_directory(&config, &mut cache)
        .await
        .expect("Build failed");

    assert_eq!(report.directory.len(), 2);
    assert_eq!(load_entries(&cache_path).len(), 3);
}
