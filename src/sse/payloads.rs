//! SSE payload deserialization structs
//!
//! Internal structs used to deserialize JSON data payloads from the run
//! stream. Content, run-completion and tool frames are read from a
//! `serde_json::Value` instead, so a field of the wrong type never drops
//! the whole frame.

use serde::Deserialize;

/// Error payload. The text may sit under any of these fields; `error`
/// is sometimes an object with its own `message`.
#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct ErrorPayload {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub content: Option<String>,
}
