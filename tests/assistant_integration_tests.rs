use std::time::Duration;

use recrutder_chat::core::content;
use recrutder_chat::core::state::Session;
use recrutder_chat::core::transcript::Role;
use recrutder_chat::transport::{AssistantTransport, HttpTransport, TransportError};
use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

const CHATBOT_PATH: &str = "/api/support/chatbot";

// ============================================================================
// Helper Functions
// ============================================================================

fn transport_for(server: &MockServer) -> HttpTransport {
    HttpTransport::with_endpoint(format!("{}{}", server.uri(), CHATBOT_PATH)).unwrap()
}

async fn mount_reply(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(CHATBOT_PATH))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Body of the single request the mock server received.
async fn received_body(server: &MockServer) -> serde_json::Value {
    let requests: Vec<Request> = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    serde_json::from_slice(&requests[0].body).unwrap()
}

// ============================================================================
// HttpTransport Tests
// ============================================================================

#[tokio::test]
async fn test_post_returns_response_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHATBOT_PATH))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Hi there!"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = Session::new("en", "/");
    let request = session.begin_send("Hello").unwrap();
    let reply = transport_for(&server).post(&request.body).await;

    assert_eq!(reply.unwrap(), "Hi there!");
}

#[tokio::test]
async fn test_post_ignores_extra_response_fields() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "response": "Our plans start at 49€.",
            "needs_ticket": false,
            "suggested_faqs": [],
            "conversation_id": "abc",
            "confidence": 0.92
        })),
    )
    .await;

    let mut session = Session::new("fr", "/pricing");
    let request = session.begin_send("Prix?").unwrap();
    let reply = transport_for(&server).post(&request.body).await;

    assert_eq!(reply.unwrap(), "Our plans start at 49€.");
}

#[tokio::test]
async fn test_non_success_status_is_api_error() {
    let server = MockServer::start().await;
    mount_reply(&server, ResponseTemplate::new(500).set_body_string("boom")).await;

    let mut session = Session::new("en", "/");
    let request = session.begin_send("Hello").unwrap();
    let result = transport_for(&server).post(&request.body).await;

    match result {
        Err(TransportError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_response_field_is_error() {
    let server = MockServer::start().await;
    mount_reply(&server, ResponseTemplate::new(200).set_body_json(json!({"detail": "nope"}))).await;

    let mut session = Session::new("en", "/");
    let request = session.begin_send("Hello").unwrap();
    let result = transport_for(&server).post(&request.body).await;

    assert!(matches!(result, Err(TransportError::MissingReply)));
}

#[tokio::test]
async fn test_empty_response_is_error() {
    let server = MockServer::start().await;
    mount_reply(&server, ResponseTemplate::new(200).set_body_json(json!({"response": ""}))).await;

    let mut session = Session::new("en", "/");
    let request = session.begin_send("Hello").unwrap();
    let result = transport_for(&server).post(&request.body).await;

    assert!(matches!(result, Err(TransportError::MissingReply)));
}

#[tokio::test]
async fn test_malformed_json_is_parse_error() {
    let server = MockServer::start().await;
    mount_reply(&server, ResponseTemplate::new(200).set_body_string("{not json")).await;

    let mut session = Session::new("en", "/");
    let request = session.begin_send("Hello").unwrap();
    let result = transport_for(&server).post(&request.body).await;

    assert!(matches!(result, Err(TransportError::Parse(_))));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({"response": "too late"}))
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let transport = HttpTransport::new(
        format!("{}{}", server.uri(), CHATBOT_PATH),
        Duration::from_millis(200),
        Duration::from_secs(1),
    )
    .unwrap();
    let mut session = Session::new("en", "/");
    let request = session.begin_send("Hello").unwrap();
    let result = transport.post(&request.body).await;

    assert!(matches!(result, Err(TransportError::Timeout)));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // Nothing listens on port 9 (discard) in the test environment.
    let transport = HttpTransport::new(
        "http://127.0.0.1:9/api/support/chatbot",
        Duration::from_secs(2),
        Duration::from_secs(1),
    )
    .unwrap();
    let mut session = Session::new("en", "/");
    let request = session.begin_send("Hello").unwrap();
    let result = transport.post(&request.body).await;

    assert!(matches!(
        result,
        Err(TransportError::Network(_)) | Err(TransportError::Timeout)
    ));
}

// ============================================================================
// Session + HttpTransport
// ============================================================================

#[tokio::test]
async fn test_session_round_trip_sends_expected_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHATBOT_PATH))
        .and(body_partial_json(json!({
            "message": "Hello",
            "language": "en",
            "context": {"page": "/"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Hi there!"})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    let mut session = Session::new("en", "/");
    assert!(session.send(&transport, "Hello").await);

    let entries: Vec<(Role, String)> = session
        .transcript()
        .iter()
        .map(|m| (m.role, m.text.clone()))
        .collect();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1], (Role::User, "Hello".to_string()));
    assert_eq!(entries[2], (Role::Assistant, "Hi there!".to_string()));
    assert!(!session.is_typing());
    assert!(session.suggestions().is_empty());

    let body = received_body(&server).await;
    let previous = body["context"]["previous_messages"].as_array().unwrap();
    assert_eq!(previous.len(), 2);
    assert_eq!(previous[0]["type"], "bot");
    assert_eq!(previous[1]["type"], "user");
    assert_eq!(previous[1]["text"], "Hello");
    assert!(previous[1]["timestamp"].is_string());
}

#[tokio::test]
async fn test_session_failure_appends_fallback() {
    let server = MockServer::start().await;
    mount_reply(&server, ResponseTemplate::new(503)).await;

    let transport = transport_for(&server);
    let mut session = Session::new("fr", "/");
    assert!(session.send(&transport, "Hello").await);

    let last = session.transcript().last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert_eq!(last.text, content::lookup("fr").fallback);
    assert!(!session.is_pending());
}

#[tokio::test]
async fn test_session_context_is_capped() {
    let server = MockServer::start().await;
    mount_reply(&server, ResponseTemplate::new(200).set_body_json(json!({"response": "ok"}))).await;

    let transport = transport_for(&server);
    let mut session = Session::new("en", "/");
    for i in 0..4 {
        session.send(&transport, &format!("q{i}")).await;
    }

    let requests = server.received_requests().await.unwrap();
    let last: serde_json::Value = serde_json::from_slice(&requests.last().unwrap().body).unwrap();
    let previous = last["context"]["previous_messages"].as_array().unwrap();
    assert_eq!(previous.len(), 5);
    assert_eq!(previous[4]["text"], "q3");
}
