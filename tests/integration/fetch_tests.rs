//! Integration tests for the cache-backed fetcher
//!
//! These tests use wiremock to count the requests that actually reach the
//! network.

use std::time::Duration;
use tempfile::TempDir;
use vote_directory::cache::{load_entries, CacheStore};
use vote_directory::config::{HttpConfig, UserAgentConfig};
use vote_directory::crawler::{FetchStats, Fetcher};
use vote_directory::VoteError;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INDEX_BODY: &str = r#"<html><body><ul class="ul-quicklinks"></ul></body></html>"#;

fn fetcher() -> Fetcher {
    Fetcher::from_config(&UserAgentConfig::default(), &HttpConfig::default())
        .expect("Failed to build fetcher")
}

#[tokio::test]
async fn test_fetch_twice_hits_network_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(INDEX_BODY))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.json");
    let mut cache = CacheStore::load(&cache_path);
    let fetcher = fetcher();
    let url = format!("{}/", mock_server.uri());

    let first = fetcher.fetch(&url, &mut cache).await.expect("First fetch failed");
    let snapshot_after_first = load_entries(&cache_path);

    let second = fetcher.fetch(&url, &mut cache).await.expect("Second fetch failed");
    let snapshot_after_second = load_entries(&cache_path);

    assert_eq!(first, INDEX_BODY);
    assert_eq!(first, second);
    assert_eq!(snapshot_after_first, snapshot_after_second);
    assert_eq!(snapshot_after_first.len(), 1);
    assert_eq!(fetcher.stats(), FetchStats { hits: 1, misses: 1 });

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_cache_survives_reload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/state/ohio/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ohio</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.json");
    let url = format!("{}/state/ohio/", mock_server.uri());

    {
        let mut cache = CacheStore::load(&cache_path);
        fetcher().fetch(&url, &mut cache).await.expect("Fetch failed");
    }

    // A new process: fresh store and fetcher over the same file
    let mut cache = CacheStore::load(&cache_path);
    let fetcher = fetcher();
    let body = fetcher.fetch(&url, &mut cache).await.expect("Cached fetch failed");

    assert_eq!(body, "<html>ohio</html>");
    assert_eq!(fetcher.stats(), FetchStats { hits: 1, misses: 0 });
}

#[tokio::test]
async fn test_http_error_is_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.json");
    let mut cache = CacheStore::load(&cache_path);
    let fetcher = fetcher();
    let url = format!("{}/missing", mock_server.uri());

    for _ in 0..2 {
        match fetcher.fetch(&url, &mut cache).await {
            Err(VoteError::HttpStatus { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected HttpStatus, got {:?}", other),
        }
    }

    assert!(cache.is_empty());
    assert!(!cache_path.exists());
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let http = HttpConfig {
        timeout_secs: 1,
        connect_timeout_secs: 1,
    };
    let fetcher = Fetcher::from_config(&UserAgentConfig::default(), &http).unwrap();

    let dir = TempDir::new().unwrap();
    let mut cache = CacheStore::load(dir.path().join("cache.json"));
    let url = format!("{}/slow", mock_server.uri());

    match fetcher.fetch(&url, &mut cache).await {
        Err(VoteError::Fetch { source, .. }) => assert!(source.is_timeout()),
        other => panic!("expected Fetch timeout, got {:?}", other),
    }
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_requests_carry_user_agent() {
    let mock_server = MockServer::start().await;
    let agent = UserAgentConfig::default().header_value();

    // Any other agent falls through to wiremock's default 404
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", agent.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(INDEX_BODY))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut cache = CacheStore::load(dir.path().join("cache.json"));
    let body = fetcher()
        .fetch(&format!("{}/", mock_server.uri()), &mut cache)
        .await
        .expect("Fetch failed");

    assert_eq!(body, INDEX_BODY);
}
