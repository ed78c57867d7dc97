//! Integration tests for `SuggestClient` against a `wiremock` server.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kwscout_sources::{SourceError, SuggestClient, SuggestionSource};

fn test_client(server: &MockServer) -> SuggestClient {
    let endpoint = format!("{}/complete/search", server.uri());
    SuggestClient::new(&endpoint, 5, "kwscout-test/0.1", "us", "en")
        .expect("failed to build test SuggestClient")
}

#[tokio::test]
async fn fetch_suggestions_returns_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/complete/search"))
        .and(query_param("client", "firefox"))
        .and(query_param("q", "calculator"))
        .and(query_param("hl", "en"))
        .and(query_param("gl", "us"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"["calculator",["calculator online","calculator app","scientific calculator"]]"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let got = client
        .fetch_suggestions("calculator")
        .await
        .expect("should parse suggestions");

    assert_eq!(
        got,
        vec!["calculator online", "calculator app", "scientific calculator"]
    );
}

#[tokio::test]
async fn fetch_suggestions_maps_429_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&server)
        .await;

    let result = test_client(&server).fetch_suggestions("calculator").await;
    assert!(
        matches!(
            result,
            Err(SourceError::RateLimited {
                retry_after_secs: 30,
                ..
            })
        ),
        "expected RateLimited, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_suggestions_maps_500_to_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = test_client(&server).fetch_suggestions("calculator").await;
    match result {
        Err(e @ SourceError::UnexpectedStatus { status: 500, .. }) => assert!(e.is_retriable()),
        other => panic!("expected UnexpectedStatus(500), got: {other:?}"),
    }
}

#[tokio::test]
async fn suggest_fails_closed_on_malformed_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>unusual traffic</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(client.suggest("calculator").await.is_empty());
}

#[tokio::test]
async fn suggest_fails_closed_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert!(test_client(&server).suggest("calculator").await.is_empty());
}

#[tokio::test]
async fn empty_suggestion_list_is_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"["zzqx",[]]"#))
        .mount(&server)
        .await;

    let got = test_client(&server)
        .fetch_suggestions("zzqx")
        .await
        .expect("empty list is valid");
    assert!(got.is_empty());
}
