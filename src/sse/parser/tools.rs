//! Tool-call lifecycle event parsers

use serde_json::{Map, Value};
use tracing::debug;

use crate::models::ToolCall;
use crate::sse::events::{StreamEvent, SseParseError};

/// Parse a tool-call-started or tool-call-completed frame.
///
/// A descriptor without a call id cannot be matched to a block and is dropped.
pub(super) fn parse_tool_call_event(
    event_type: &str,
    data: &str,
    completed: bool,
) -> Result<Option<StreamEvent>, SseParseError> {
    let v: Value =
        serde_json::from_str(data).map_err(|e| SseParseError::invalid_json(event_type, e))?;

    let call = tool_call_from_json(&v);
    if call.call_id.is_empty() {
        debug!(event_type, "Dropping tool event without a call id");
        return Ok(None);
    }

    Ok(Some(if completed {
        StreamEvent::ToolCallCompleted { call }
    } else {
        StreamEvent::ToolCallStarted { call }
    }))
}

/// Read a tool descriptor from either a nested `tool` object or the top
/// level of `v`. The returned `call_id` is empty when no id field exists.
pub(crate) fn tool_call_from_json(v: &Value) -> ToolCall {
    let src = v.get("tool").filter(|t| t.is_object()).unwrap_or(v);

    ToolCall {
        call_id: string_field(src, &["call_id", "tool_call_id", "id"]).unwrap_or_default(),
        name: string_field(src, &["name", "tool_name", "function"]).unwrap_or_default(),
        arguments: arguments_field(src),
        result: result_field(src),
        duration: duration_field(src),
    }
}

fn string_field(src: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| src.get(*key))
        .find_map(|value| match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn arguments_field(src: &Value) -> Map<String, Value> {
    ["arguments", "tool_args", "args"]
        .iter()
        .filter_map(|key| src.get(*key))
        .find_map(|value| match value {
            Value::Object(map) => Some(map.clone()),
            // Some backends ship arguments as a JSON-encoded string
            Value::String(s) => serde_json::from_str::<Map<String, Value>>(s).ok(),
            _ => None,
        })
        .unwrap_or_default()
}

fn result_field(src: &Value) -> Option<String> {
    match src.get("result")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn duration_field(src: &Value) -> Option<f64> {
    src.get("duration")
        .and_then(Value::as_f64)
        .or_else(|| {
            let metrics = src.get("metrics")?;
            metrics
                .get("duration")
                .or_else(|| metrics.get("time"))
                .and_then(Value::as_f64)
        })
}
