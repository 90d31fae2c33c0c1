//! Content and run-completion event parsers

use serde_json::Value;

use crate::sse::events::{StreamEvent, SseParseError};

fn parse_value(event_type: &str, data: &str) -> Result<Value, SseParseError> {
    serde_json::from_str(data).map_err(|e| SseParseError::invalid_json(event_type, e))
}

/// Parse a content fragment. Missing, empty or non-string text produces
/// no record.
pub(super) fn parse_content_event(
    event_type: &str,
    data: &str,
) -> Result<Option<StreamEvent>, SseParseError> {
    let payload = parse_value(event_type, data)?;

    Ok(payload
        .get("content")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(|text| StreamEvent::Content {
            text: text.to_string(),
        }))
}

/// Parse run completion. Any well-formed JSON payload produces a record;
/// a missing, empty or non-string session id counts as absent.
pub(super) fn parse_run_completed_event(
    event_type: &str,
    data: &str,
) -> Result<Option<StreamEvent>, SseParseError> {
    let payload = parse_value(event_type, data)?;

    Ok(Some(StreamEvent::RunCompleted {
        session_id: payload
            .get("session_id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(String::from),
    }))
}
