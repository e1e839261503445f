//! Backend client against a mock NetProtect API

use netprotect::client::{BackendClient, ConfigBackend};
use netprotect::error::ApiError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::integration::test_utils::{config_envelope, config_for, SAMPLE};

async fn client_for(server: &MockServer) -> BackendClient {
    let config = config_for(&format!("{}/api/v1", server.uri()), Some("sid=abc"));
    BackendClient::new(&config.api).unwrap()
}

#[tokio::test]
async fn test_get_agent_config_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/agent/a1/config"))
        .and(header("cookie", "sid=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(config_envelope("a1", SAMPLE)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let record = client.get_agent_config("a1").await.unwrap();
    assert_eq!(record.agent_id, "a1");
    assert_eq!(record.raw_config, SAMPLE);
    assert_eq!(record.updated_at.as_deref(), Some("2024-05-02T10:00:00Z"));
}

#[tokio::test]
async fn test_update_sends_raw_config_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/agent/a1/config"))
        .and(body_json(json!({ "raw_config": SAMPLE })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.update_agent_config("a1", SAMPLE).await.unwrap();
}

#[tokio::test]
async fn test_create_posts_raw_config() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/agent/a2/config"))
        .and(body_json(json!({ "raw_config": "[agent]" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.create_agent_config("a2", "[agent]").await.unwrap();
}

#[tokio::test]
async fn test_status_codes_map_to_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/agent/missing/config"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no config"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/agent/secret/config"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/agent/broken/config"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(matches!(
        client.get_agent_config("missing").await,
        Err(ApiError::NotFound(_))
    ));
    assert!(matches!(
        client.get_agent_config("secret").await,
        Err(ApiError::Unauthorized(_))
    ));
    match client.update_agent_config("broken", "x").await {
        Err(ApiError::RequestFailed(msg)) => assert!(msg.contains("db down")),
        other => panic!("expected RequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/agent/a1/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rawConfig": "x" })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(matches!(
        client.get_agent_config("a1").await,
        Err(ApiError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_agent_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/agent/a1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-123" })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert_eq!(client.get_agent_token("a1").await.unwrap(), "tok-123");
}

#[tokio::test]
async fn test_check_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/user/check-auth"))
        .and(header("cookie", "sid=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "role": "admin" })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let user = client.check_auth().await.unwrap();
    assert_eq!(user.role, "admin");

    let anonymous = BackendClient::new(&config_for(&format!("{}/api/v1", server.uri()), None).api)
        .unwrap();
    assert!(anonymous.check_auth().await.is_none());
}

#[tokio::test]
async fn test_check_auth_unreachable_backend() {
    let config = config_for("http://127.0.0.1:9/api/v1", None);
    let client = BackendClient::new(&config.api).unwrap();
    assert!(client.check_auth().await.is_none());
}

#[tokio::test]
async fn test_agent_id_with_reserved_characters_stays_in_one_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/agent/east%2Fdc%231/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(config_envelope("east/dc#1", SAMPLE)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let record = client.get_agent_config("east/dc#1").await.unwrap();
    assert_eq!(record.agent_id, "east/dc#1");
}
