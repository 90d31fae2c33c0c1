//! Error event parser

use crate::sse::events::{StreamEvent, SseParseError};
use crate::sse::payloads::ErrorPayload;

const GENERIC_ERROR: &str = "The agent reported an error";

/// Parse an in-band error frame
pub(super) fn parse_error_event(
    event_type: &str,
    data: &str,
) -> Result<Option<StreamEvent>, SseParseError> {
    let payload: ErrorPayload =
        serde_json::from_str(data).map_err(|e| SseParseError::invalid_json(event_type, e))?;

    let nested = payload.error.and_then(|e| match e {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Object(map) => map
            .get("message")
            .and_then(|m| m.as_str())
            .map(String::from),
        _ => None,
    });

    let message = payload
        .message
        .or(nested)
        .or(payload.content)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| GENERIC_ERROR.to_string());

    Ok(Some(StreamEvent::Error { message }))
}
