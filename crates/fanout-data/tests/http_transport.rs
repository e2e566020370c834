//! Fetch client tests against a live mock HTTP server.

use std::time::Duration;

use fanout_core::Endpoint;
use fanout_data::{FailureKind, FetchClient, FetchResult, TimeoutConfig};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(timeout_ms: u64) -> FetchClient {
    FetchClient::new(TimeoutConfig::from_total(Duration::from_millis(timeout_ms))).unwrap()
}

fn endpoint(server: &MockServer, route: &str) -> Endpoint {
    Endpoint::new(format!("{}{}", server.uri(), route))
}

#[tokio::test]
async fn test_success_parses_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"a": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(2_000).fetch_one(&endpoint(&server, "/data1")).await;

    assert_eq!(result, FetchResult::success(json!({"a": 1})));
}

#[tokio::test]
async fn test_server_error_is_request_failure() {
    let server = MockServer::start().await;
    Mock::given(path("/data3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let ep = endpoint(&server, "/data3");
    let result = client(2_000).fetch_one(&ep).await;

    let error = result.error().expect("500 must be a failure");
    assert_eq!(error.kind(), FailureKind::RequestFailed);
    assert_eq!(error.http_status(), Some(500));
    assert!(error
        .to_string()
        .starts_with(&format!("Request failed for {}: ", ep)));
}

#[tokio::test]
async fn test_not_found_is_request_failure() {
    let server = MockServer::start().await;

    let result = client(2_000).fetch_one(&endpoint(&server, "/missing")).await;

    assert_eq!(result.error().and_then(|e| e.http_status()), Some(404));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(path("/data2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"late": true}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let ep = endpoint(&server, "/data2");
    let result = client(200).fetch_one(&ep).await;

    let error = result.error().expect("slow response must time out");
    assert!(error.is_timeout());
    assert_eq!(error.to_string(), format!("Timeout occurred for {}", ep));
}

#[tokio::test]
async fn test_invalid_json_is_parse_failure() {
    let server = MockServer::start().await;
    Mock::given(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = client(2_000).fetch_one(&endpoint(&server, "/broken")).await;

    assert_eq!(result.error().map(|e| e.kind()), Some(FailureKind::ParseFailed));
}

#[tokio::test]
async fn test_connection_refused_is_request_failure() {
    // Reserve a port, then release it so nothing is listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let ep = Endpoint::new(format!("http://127.0.0.1:{}/gone", port));

    let result = client(2_000).fetch_one(&ep).await;

    let error = result.error().expect("closed port must fail");
    assert_eq!(error.kind(), FailureKind::RequestFailed);
    assert_eq!(error.http_status(), None);
}

#[tokio::test]
async fn test_malformed_url_is_request_failure() {
    let result = client(2_000).fetch_one(&Endpoint::new("not a url")).await;

    let message = result.message().unwrap();
    assert!(message.starts_with("Request failed for not a url: "));
}
