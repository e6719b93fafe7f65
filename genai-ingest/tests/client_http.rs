use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use genai_ingest::Client;

#[tokio::test]
async fn api_key_header_is_inserted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/files/abc"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "files/abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .build()
        .unwrap();
    client.files().get("abc").await.unwrap();
}

#[tokio::test]
async fn api_key_header_respects_custom_value() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/files/abc"))
        .and(header("x-goog-api-key", "custom-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "files/abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder()
        .api_key("test-key")
        .header("x-goog-api-key", "custom-key")
        .base_url(server.uri())
        .build()
        .unwrap();
    client.files().get("files/abc").await.unwrap();
}

#[tokio::test]
async fn missing_api_key_sends_no_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta/files/abc"))
        .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
        .mount(&server)
        .await;

    let client = Client::builder().base_url(server.uri()).build().unwrap();
    let err = client.files().get("abc").await.unwrap_err();
    assert!(matches!(
        err,
        genai_ingest::Error::ApiError { status: 403, .. }
    ));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("x-goog-api-key").is_none());
}

#[tokio::test]
async fn custom_api_version_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "files/abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .api_version("v1")
        .build()
        .unwrap();
    client.files().get("abc").await.unwrap();
}
