// Tests for `ReqwestGateway` against a wiremock gateway.

use std::error::Error;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wattbridge_adapter_gateway_reqwest::{GatewayConfig, ReqwestGateway};
use wattbridge_app::ports::GatewayTransport;
use wattbridge_domain::error::ReadError;

async fn setup(timeout_secs: u64) -> (MockServer, ReqwestGateway) {
    let server = MockServer::start().await;
    let config = GatewayConfig {
        id: "GW-1".to_string(),
        base_url: server.uri(),
        timeout_secs,
        accept_invalid_certs: false,
    };
    let gateway = ReqwestGateway::from_config(&config).unwrap();
    (server, gateway)
}

#[tokio::test]
async fn should_return_body_of_successful_read() {
    let (server, gateway) = setup(5).await;
    Mock::given(method("GET"))
        .and(path("/api/system_status/soe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "percentage": 87.5 })))
        .expect(1)
        .mount(&server)
        .await;

    let body = gateway.get("system_status/soe").await.unwrap();

    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["percentage"], 87.5);
}

#[tokio::test]
async fn should_map_error_status_to_remote_error() {
    let (server, gateway) = setup(5).await;
    Mock::given(method("GET"))
        .and(path("/api/sitemaster"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let result = gateway.get("sitemaster").await;

    assert!(
        matches!(result, Err(ReadError::Remote { ref path, status: 502 }) if path == "sitemaster"),
        "expected Remote error, got: {result:?}"
    );
}

#[tokio::test]
async fn should_map_unknown_path_to_remote_error() {
    let (_server, gateway) = setup(5).await;

    let result = gateway.get("site_info").await;

    assert!(matches!(result, Err(ReadError::Remote { status: 404, .. })));
}

#[tokio::test]
async fn should_map_slow_gateway_to_transport_error() {
    let (server, gateway) = setup(1).await;
    Mock::given(method("GET"))
        .and(path("/api/meters/aggregates"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let result = gateway.get("meters/aggregates").await;

    assert!(
        matches!(result, Err(ReadError::Transport { ref path, .. }) if path == "meters/aggregates"),
        "expected Transport error, got: {result:?}"
    );
}

#[tokio::test]
async fn should_keep_timeout_cause_in_error_chain() {
    let (server, gateway) = setup(1).await;
    Mock::given(method("GET"))
        .and(path("/api/sitemaster"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let err = gateway.get("sitemaster").await.unwrap_err();

    let mut causes = Vec::new();
    let mut timed_out = false;
    let mut source = err.source();
    while let Some(cause) = source {
        causes.push(cause.to_string());
        if let Some(http) = cause.downcast_ref::<reqwest::Error>() {
            timed_out |= http.is_timeout();
        }
        source = cause.source();
    }
    assert_eq!(causes.first().map(String::as_str), Some("request failed"));
    assert!(timed_out, "no timeout in error chain: {causes:?}");
}
