//! Common test utilities for integration tests.
//!
//! Fixtures for SSE bodies, history envelopes and chat sessions backed by
//! a [`MockHttpClient`] and a temporary session store.
//!
//! # Example
//!
//! ```ignore
//! let body = sse_body(&[content_frame("Hi"), run_completed_frame("sess-1")]);
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use rambot::prelude::*;
use tempfile::TempDir;

/// Base URL used with the mock HTTP client.
pub const TEST_API_URL: &str = "https://api.test/v1";

/// Runs endpoint for the default agent under [`TEST_API_URL`].
pub fn runs_url() -> String {
    format!("{}/agents/rambot/runs", TEST_API_URL)
}

/// Sessions endpoint prefix under [`TEST_API_URL`].
pub fn session_url(session_id: &str) -> String {
    format!("{}/sessions/{}", TEST_API_URL, session_id)
}

/// One SSE frame with an explicit event name.
pub fn sse_frame(event: &str, data: &serde_json::Value) -> String {
    format!("event: {}\ndata: {}\n\n", event, data)
}

pub fn content_frame(text: &str) -> String {
    sse_frame("RunContent", &serde_json::json!({ "content": text }))
}

pub fn run_completed_frame(session_id: &str) -> String {
    sse_frame(
        "RunCompleted",
        &serde_json::json!({ "session_id": session_id }),
    )
}

pub fn tool_started_frame(call_id: &str, name: &str) -> String {
    sse_frame(
        "ToolCallStarted",
        &serde_json::json!({ "tool": { "tool_call_id": call_id, "tool_name": name } }),
    )
}

pub fn tool_completed_frame(call_id: &str, name: &str, result: &str) -> String {
    sse_frame(
        "ToolCallCompleted",
        &serde_json::json!({
            "tool": { "tool_call_id": call_id, "tool_name": name, "result": result }
        }),
    )
}

/// Concatenate frames into one response body.
pub fn sse_body(frames: &[String]) -> String {
    frames.concat()
}

/// A `success: true` history envelope.
pub fn history_json(entries: &[(&str, &str, i64)]) -> String {
    let history: Vec<serde_json::Value> = entries
        .iter()
        .map(|(role, content, created_at)| {
            serde_json::json!({ "role": role, "content": content, "created_at": created_at })
        })
        .collect();
    serde_json::json!({ "success": true, "data": { "history": history } }).to_string()
}

/// Chat session over `http`, with its store in a fresh temporary directory.
///
/// The directory must outlive the session, so it is returned alongside.
pub fn test_session(http: MockHttpClient) -> (ChatSession<MockHttpClient>, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::open(dir.path()).unwrap();
    let client = AgentClient::new(http, ClientConfig::new().with_api_url(TEST_API_URL));
    (ChatSession::new(client, store), dir)
}

/// Like [`test_session`] but reusing an existing store directory.
pub fn test_session_in(http: MockHttpClient, dir: &TempDir) -> ChatSession<MockHttpClient> {
    let store = SessionStore::open(dir.path()).unwrap();
    let client = AgentClient::new(http, ClientConfig::new().with_api_url(TEST_API_URL));
    ChatSession::new(client, store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sse_frame_format() {
        let frame = content_frame("Hi");
        assert_eq!(frame, "event: RunContent\ndata: {\"content\":\"Hi\"}\n\n");
    }

    #[test]
    fn test_history_json_is_success_envelope() {
        let json = history_json(&[("user", "hi", 1)]);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["history"][0]["role"], "user");
    }
}
