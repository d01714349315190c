//! Client behavior against a mock model server

use std::time::Duration;

use ipcsense_llm::{describe_failure, LlmClient, LlmConfig, LlmError, NO_RESPONSE};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, timeout_secs: u64) -> LlmClient {
    let config = LlmConfig {
        base_url: server.uri(),
        model: "ipc-legal".to_string(),
        timeout_secs,
    };
    LlmClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_generate_returns_response_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_json(json!({
            "model": "ipc-legal",
            "prompt": "Someone stole my bicycle",
            "stream": false
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"response": "Section 379 applies."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let text = client.generate("Someone stole my bicycle").await.unwrap();
    assert_eq!(text, "Section 379 applies.");
}

#[tokio::test]
async fn test_missing_response_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"done": true})))
        .mount(&server)
        .await;

    let text = client_for(&server, 5).generate("hello").await.unwrap();
    assert_eq!(text, NO_RESPONSE);
}

#[tokio::test]
async fn test_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let err = client.generate("hello").await.unwrap_err();
    match &err {
        LlmError::Status { status, body } => {
            assert_eq!(*status, 500);
            assert_eq!(body, "model crashed");
        }
        other => panic!("expected status error, got {other:?}"),
    }

    assert_eq!(
        client.ask("hello").await,
        "Error: API returned status code 500\nmodel crashed"
    );
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server, 5).generate("hello").await.unwrap_err();
    assert!(matches!(err, LlmError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server() {
    // Reserve a free port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = LlmClient::new(&LlmConfig {
        base_url: format!("http://{}", addr),
        model: "ipc-legal".to_string(),
        timeout_secs: 5,
    })
    .unwrap();

    let err = client.generate("hello").await.unwrap_err();
    assert!(matches!(err, LlmError::Connection(_)));

    let message = describe_failure(&err);
    assert!(message.starts_with("Error connecting to the model API: "));
    assert!(message.ends_with("Make sure the model server is running on your machine."));
}

#[tokio::test]
async fn test_timeout_is_connection_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": "late"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = client_for(&server, 1).generate("hello").await.unwrap_err();
    assert!(matches!(err, LlmError::Connection(_)));
}
