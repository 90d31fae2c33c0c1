//! SSE event types and definitions
//!
//! Contains the StreamEvent enum with every record the agent run stream can
//! produce, plus the line classification and parse error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ToolCall;

/// Typed records emitted by the run stream, in arrival order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Assistant text fragment (never empty)
    Content { text: String },
    /// Run finished; carries the session id when the backend assigned one
    RunCompleted {
        #[serde(default)]
        session_id: Option<String>,
    },
    /// The agent started invoking a tool
    ToolCallStarted { call: ToolCall },
    /// A tool invocation finished
    ToolCallCompleted { call: ToolCall },
    /// Error reported by the backend inside the stream
    Error { message: String },
}

impl StreamEvent {
    /// Returns the event type name as a string for debugging purposes.
    pub fn event_type_name(&self) -> &'static str {
        match self {
            StreamEvent::Content { .. } => EventKind::Content.as_str(),
            StreamEvent::RunCompleted { .. } => EventKind::RunCompleted.as_str(),
            StreamEvent::ToolCallStarted { .. } => EventKind::ToolCallStarted.as_str(),
            StreamEvent::ToolCallCompleted { .. } => EventKind::ToolCallCompleted.as_str(),
            StreamEvent::Error { .. } => EventKind::Error.as_str(),
        }
    }
}

/// Event kinds understood by the parser.
///
/// Each kind accepts its kebab-case wire name and the CamelCase name the
/// agent framework emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Content,
    RunCompleted,
    ToolCallStarted,
    ToolCallCompleted,
    Error,
}

impl EventKind {
    /// Resolve a wire name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "content" | "RunContent" => Some(EventKind::Content),
            "run-completed" | "RunCompleted" => Some(EventKind::RunCompleted),
            "tool-call-started" | "ToolCallStarted" => Some(EventKind::ToolCallStarted),
            "tool-call-completed" | "ToolCallCompleted" => Some(EventKind::ToolCallCompleted),
            "error" | "RunError" => Some(EventKind::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Content => "content",
            EventKind::RunCompleted => "run-completed",
            EventKind::ToolCallStarted => "tool-call-started",
            EventKind::ToolCallCompleted => "tool-call-completed",
            EventKind::Error => "error",
        }
    }
}

/// Represents a parsed SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Event type declaration (e.g., "event: content")
    Event(String),
    /// Data payload (e.g., "data: {\"content\": \"hello\"}")
    Data(String),
    /// Empty line - ends the current event block
    Empty,
    /// Comment line (starts with ':') or a line with no known field
    Comment(String),
}

/// Errors that can occur while decoding a single frame.
///
/// The stateful parser never returns these; it logs them and drops the frame.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SseParseError {
    /// Invalid JSON in data payload
    #[error("Invalid JSON for event '{event_type}': {message}")]
    InvalidJson { event_type: String, message: String },
}

impl SseParseError {
    pub(crate) fn invalid_json(event_type: &str, err: serde_json::Error) -> Self {
        SseParseError::InvalidJson {
            event_type: event_type.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_event_type_name() {
        assert_eq!(
            StreamEvent::Content {
                text: "hi".to_string()
            }
            .event_type_name(),
            "content"
        );
        assert_eq!(
            StreamEvent::RunCompleted { session_id: None }.event_type_name(),
            "run-completed"
        );
        assert_eq!(
            StreamEvent::ToolCallCompleted {
                call: ToolCall::new("c1", "search")
            }
            .event_type_name(),
            "tool-call-completed"
        );
    }

    #[test]
    fn test_event_kind_aliases() {
        assert_eq!(EventKind::from_name("content"), Some(EventKind::Content));
        assert_eq!(EventKind::from_name("RunContent"), Some(EventKind::Content));
        assert_eq!(
            EventKind::from_name("RunCompleted"),
            Some(EventKind::RunCompleted)
        );
        assert_eq!(
            EventKind::from_name("ToolCallStarted"),
            Some(EventKind::ToolCallStarted)
        );
        assert_eq!(EventKind::from_name("RunError"), Some(EventKind::Error));
        assert_eq!(EventKind::from_name("RunStarted"), None);
        assert_eq!(EventKind::from_name("Content"), None);
    }

    #[test]
    fn test_sse_parse_error_display() {
        let err = SseParseError::InvalidJson {
            event_type: "content".to_string(),
            message: "expected value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid JSON for event 'content': expected value"
        );
    }
}
