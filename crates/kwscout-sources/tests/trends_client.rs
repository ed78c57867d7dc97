//! Integration tests for `TrendsClient` against a `wiremock` server.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kwscout_sources::{SourceError, TrendSource, TrendsClient};

fn test_client(server: &MockServer) -> TrendsClient {
    TrendsClient::new(&server.uri(), 5, "kwscout-test/0.1", "US")
        .expect("failed to build test TrendsClient")
}

fn terms(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

#[tokio::test]
async fn interest_over_time_returns_series() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/interest"))
        .and(query_param("window", "now 7-d"))
        .and(query_param("geo", "US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "series": {
                "GPTs": [50, 60, 70],
                "pdf merger": [2, 4, 6]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let series = test_client(&server)
        .interest_over_time(&terms(&["GPTs", "pdf merger"]), "now 7-d")
        .await
        .expect("should parse series");

    assert_eq!(series.len(), 2);
    assert_eq!(series.get("gpts"), Some([50.0, 60.0, 70.0].as_slice()));
    assert_eq!(series.get("pdf merger"), Some([2.0, 4.0, 6.0].as_slice()));
}

#[tokio::test]
async fn interest_over_time_empty_series_is_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/interest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "series": {} })))
        .mount(&server)
        .await;

    let result = test_client(&server)
        .interest_over_time(&terms(&["GPTs"]), "now 7-d")
        .await;
    match result {
        Err(e @ SourceError::NoData { .. }) => assert!(!e.is_retriable()),
        other => panic!("expected NoData, got: {other:?}"),
    }
}

#[tokio::test]
async fn interest_over_time_429_is_rate_limited_with_default_wait() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = test_client(&server)
        .interest_over_time(&terms(&["GPTs"]), "now 7-d")
        .await;
    assert!(
        matches!(
            result,
            Err(SourceError::RateLimited {
                service: "trends",
                retry_after_secs: 60
            })
        ),
        "expected RateLimited, got: {result:?}"
    );
}

#[tokio::test]
async fn interest_over_time_404_is_permanent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .interest_over_time(&terms(&["GPTs"]), "now 7-d")
        .await
        .expect_err("404 must fail");
    assert!(matches!(err, SourceError::UnexpectedStatus { status: 404, .. }));
    assert!(!err.is_retriable());
}

#[tokio::test]
async fn interest_over_time_malformed_body_is_retriable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .interest_over_time(&terms(&["GPTs"]), "now 7-d")
        .await
        .expect_err("html must fail");
    assert!(matches!(err, SourceError::Deserialize { .. }));
    assert!(err.is_retriable());
}

#[tokio::test]
async fn rising_queries_returns_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/related"))
        .and(query_param("term", "calculator"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rising": [
                { "query": "ai calculator", "value": 350 },
                { "query": "calculator with steps", "value": 120 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rising = test_client(&server)
        .rising_queries("calculator", "now 7-d")
        .await
        .expect("should parse rising queries");

    assert_eq!(rising.len(), 2);
    assert_eq!(rising[0].query, "ai calculator");
    assert!((rising[0].value - 350.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn rising_queries_missing_list_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/related"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rising": null })))
        .mount(&server)
        .await;

    let rising = test_client(&server)
        .rising_queries("calculator", "now 7-d")
        .await
        .expect("null list is valid");
    assert!(rising.is_empty());
}
