//! Transport tests: headers, URL resolution and status mapping.
//!
//! Uses wiremock to stand in for the Fortnox API.

use fortnox::{Config, FortnoxClient, FortnoxError};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> FortnoxClient {
    let config = Config::new("test-token", "test-secret").with_base_url(server.uri());
    FortnoxClient::new(config).unwrap()
}

#[tokio::test]
async fn test_every_request_carries_credentials_and_json_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/financialyears/1"))
        .and(header("Access-Token", "test-token"))
        .and(header("Client-Secret", "test-secret"))
        .and(header("Content-Type", "application/json"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body = client.get("/financialyears/1").await.unwrap();

    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_relative_target_without_slash_is_joined() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/voucherseries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.get("voucherseries").await.unwrap();
}

#[tokio::test]
async fn test_absolute_target_is_used_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vouchers/A/12"))
        .and(query_param("financialyear", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    // The base URL points elsewhere; the absolute target must win.
    let config = Config::new("test-token", "test-secret").with_base_url("http://127.0.0.1:9/3");
    let client = FortnoxClient::new(config).unwrap();

    let target = format!("{}/vouchers/A/12?financialyear=3", mock_server.uri());
    client.get(&target).await.unwrap();
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({"VoucherSeries": {"Code": "K", "Manual": false}});

    Mock::given(method("POST"))
        .and(path("/voucherseries"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"created": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.post("/voucherseries", &body).await.unwrap();

    assert_eq!(response["created"], 1);
}

#[tokio::test]
async fn test_get_404_is_object_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/financialyears/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get("/financialyears/99").await.unwrap_err();

    assert!(matches!(err, FortnoxError::ObjectNotFound { .. }));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_put_404_is_object_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/voucherseries/Z"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .put("/voucherseries/Z", &serde_json::json!({}))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_post_404_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/vouchers"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .post("/vouchers", &serde_json::json!({}))
        .await
        .unwrap_err();

    assert!(!err.is_not_found());
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_error_information_message_is_extracted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/vouchers"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "ErrorInformation": {
                "error": 1,
                "message": "Verifikationen är inte balanserad",
                "code": 2000755
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .post("/vouchers", &serde_json::json!({}))
        .await
        .unwrap_err();

    match err {
        FortnoxError::ApiError { message, status_code } => {
            assert_eq!(status_code, 400);
            assert_eq!(message, "Verifikationen är inte balanserad");
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_reports_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vouchers"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "5"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get("/vouchers").await.unwrap_err();

    assert!(matches!(
        err,
        FortnoxError::RateLimited {
            retry_after_secs: Some(5)
        }
    ));
}

#[tokio::test]
async fn test_delete_with_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/voucherseries/K"))
        .and(header("Access-Token", "test-token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.delete("/voucherseries/K").await.unwrap();
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/voucherseries/A"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body = client
        .put("/voucherseries/A", &serde_json::json!({}))
        .await
        .unwrap();

    assert!(body.is_null());
}

#[tokio::test]
async fn test_from_env_requires_credentials() {
    if std::env::var("FORTNOX_ACCESS_TOKEN").is_err() {
        let err = FortnoxClient::from_env().unwrap_err();
        assert!(matches!(err, FortnoxError::ConfigMissing(_)));
    }
}
