//! Agent client tests against a real HTTP server.
//!
//! Uses wiremock to serve SSE bodies and history envelopes so the reqwest
//! adapter, the form encoding and the SSE pipeline run end to end.

mod common;

use common::*;
use futures_util::StreamExt;
use rambot::adapters::ReqwestHttpClient;
use rambot::error::NetworkError;
use rambot::prelude::*;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AgentClient {
    AgentClient::new(
        ReqwestHttpClient::new(),
        ClientConfig::new().with_api_url(server.uri()),
    )
}

async fn collect(mut events: EventStream) -> Vec<StreamEvent> {
    let mut out = Vec::new();
    while let Some(item) = events.next().await {
        out.push(item.expect("stream should not fail"));
    }
    out
}

#[tokio::test]
async fn test_stream_run_posts_form_and_parses_events() {
    let mock_server = MockServer::start().await;
    let body = sse_body(&[
        content_frame("Hello"),
        tool_started_frame("c1", "search"),
        tool_completed_frame("c1", "search", "3 results"),
        run_completed_frame("sess-42"),
    ]);

    Mock::given(method("POST"))
        .and(path("/agents/rambot/runs"))
        .and(header("Accept", "text/event-stream"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("message=hello%20there"))
        .and(body_string_contains("user_id=user-1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = RunRequest::new("hello there", "user-1");
    let events = collect(client.stream_run(&request).await.unwrap()).await;

    assert_eq!(events.len(), 4);
    assert_eq!(
        events[0],
        StreamEvent::Content {
            text: "Hello".to_string()
        }
    );
    match &events[2] {
        StreamEvent::ToolCallCompleted { call } => {
            assert_eq!(call.call_id, "c1");
            assert_eq!(call.result.as_deref(), Some("3 results"));
        }
        other => panic!("Expected ToolCallCompleted, got {:?}", other),
    }
    assert_eq!(
        events[3],
        StreamEvent::RunCompleted {
            session_id: Some("sess-42".to_string())
        }
    );
}

#[tokio::test]
async fn test_stream_run_sends_session_when_continuing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/agents/rambot/runs"))
        .and(body_string_contains("session_id=sess-7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(content_frame("again"), "text/event-stream"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = RunRequest::new("more", "user-1").with_session(Some("sess-7".to_string()));
    let events = collect(client.stream_run(&request).await.unwrap()).await;
    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn test_stream_run_flushes_unterminated_frame() {
    let mock_server = MockServer::start().await;

    // No trailing newline after the last data line
    Mock::given(method("POST"))
        .and(path("/agents/rambot/runs"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "event: content\ndata: {\"content\":\"tail\"}",
            "text/event-stream",
        ))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let events = collect(
        client
            .stream_run(&RunRequest::new("hi", "user-1"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(
        events,
        vec![StreamEvent::Content {
            text: "tail".to_string()
        }]
    );
}

#[tokio::test]
async fn test_stream_run_rejected_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/agents/rambot/runs"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.stream_run(&RunRequest::new("hi", "user-1")).await;
    match result {
        Err(NetworkError::HttpStatus { status, .. }) => assert_eq!(status, 500),
        Err(other) => panic!("Expected HttpStatus, got {:?}", other),
        Ok(_) => panic!("Expected an error"),
    }
}

#[tokio::test]
async fn test_fetch_history_success() {
    let mock_server = MockServer::start().await;
    let history = history_json(&[
        ("user", "hi", 1_700_000_000),
        ("assistant", "hello", 1_700_000_001),
    ]);

    Mock::given(method("GET"))
        .and(path("/sessions/sess-1"))
        .and(query_param("type", "agent"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(history, "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let entries = client.fetch_history("sess-1").await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].role, HistoryRole::User);
    assert_eq!(entries[1].content, "hello");
}

#[tokio::test]
async fn test_fetch_history_api_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sessions/missing"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": false })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.fetch_history("missing").await.unwrap_err();
    assert_eq!(
        err,
        NetworkError::Api {
            message: "Failed to load chat history".to_string()
        }
    );
}

#[tokio::test]
async fn test_fetch_history_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sessions/sess-1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.fetch_history("sess-1").await.unwrap_err();
    assert!(matches!(err, NetworkError::HttpStatus { status: 502, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_connection_refused() {
    // Reserve a free port, then release it so nothing listens there
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = AgentClient::new(
        ReqwestHttpClient::new(),
        ClientConfig::new().with_api_url(format!("http://127.0.0.1:{}", port)),
    );
    let result = client.stream_run(&RunRequest::new("hi", "user-1")).await;
    match result {
        Err(NetworkError::ConnectionFailed { url, .. }) => {
            assert!(url.ends_with("/agents/rambot/runs"))
        }
        Err(other) => panic!("Expected ConnectionFailed, got {:?}", other),
        Ok(_) => panic!("Expected a connection error"),
    }
}
