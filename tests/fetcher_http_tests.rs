//! HTTP behaviour of the NHL bracket fetcher against a mock server

use bracket_sync::bracket::{BracketFetcher, FetchError, NhlApiFetcher};
use bracket_sync::config::ApiConfig;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 2,
        ..ApiConfig::default()
    }
}

#[tokio::test]
async fn test_fetch_returns_decoded_bracket() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/playoff-bracket/2025"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bracketLogo": "https://assets.nhle.com/logos/playoffs/png/scp-20252026.png",
            "series": [{"seriesLetter": "A", "topSeedWins": 4, "bottomSeedWins": 1}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = NhlApiFetcher::new(&api_config(&server.uri())).unwrap();
    let payload = fetcher.fetch(2025).await.unwrap();

    assert_eq!(payload["series"][0]["seriesLetter"], "A");
    assert_eq!(payload["series"][0]["topSeedWins"], 4);
}

#[tokio::test]
async fn test_trailing_slash_in_base_url_is_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/playoff-bracket/2024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rounds": [1]})))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = NhlApiFetcher::new(&api_config(&format!("{}/", server.uri()))).unwrap();

    assert!(fetcher.fetch(2024).await.is_ok());
}

#[tokio::test]
async fn test_not_found_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = NhlApiFetcher::new(&api_config(&server.uri())).unwrap();
    let err = fetcher.fetch(1899).await.unwrap_err();

    match err {
        FetchError::Status { url, status } => {
            assert_eq!(status.as_u16(), 404);
            assert!(url.ends_with("/v1/playoff-bracket/1899"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let fetcher = NhlApiFetcher::new(&api_config(&server.uri())).unwrap();

    assert!(matches!(
        fetcher.fetch(2025).await,
        Err(FetchError::Decode { .. })
    ));
}

#[tokio::test]
async fn test_empty_object_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let fetcher = NhlApiFetcher::new(&api_config(&server.uri())).unwrap();

    assert!(matches!(
        fetcher.fetch(2025).await,
        Err(FetchError::EmptyPayload { .. })
    ));
}

#[tokio::test]
async fn test_connection_refused_is_a_request_error() {
    let fetcher = NhlApiFetcher::new(&api_config("http://127.0.0.1:9")).unwrap();

    assert!(matches!(
        fetcher.fetch(2025).await,
        Err(FetchError::Request { .. })
    ));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"rounds": [1]}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = api_config(&server.uri());
    config.timeout_seconds = 1;
    let fetcher = NhlApiFetcher::new(&config).unwrap();

    match fetcher.fetch(2025).await {
        Err(FetchError::Request { source, .. }) => assert!(source.is_timeout()),
        other => panic!("expected a timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_configured_user_agent_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "bracket-sync-tests/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rounds": [1]})))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = api_config(&server.uri());
    config.user_agent = "bracket-sync-tests/1.0".to_string();
    let fetcher = NhlApiFetcher::new(&config).unwrap();

    assert!(fetcher.fetch(2025).await.is_ok());
}
