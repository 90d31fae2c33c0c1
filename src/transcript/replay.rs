//! Historical replay path: rebuilds messages from a flat session log.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use super::builder::{TranscriptBuilder, TurnState};
use crate::models::{HistoryEntry, HistoryRole, Message, MessageRole, ToolCall};
use crate::sse::tool_call_from_json;

/// Label for tool output that matches no known format
pub const GENERIC_TOOL_NAME: &str = "tool";

/// `name(arg=value, ...) completed in 0.12s.`
static TOOL_SUMMARY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*([A-Za-z_][\w.\-]*)\((.*)\)\s+completed in\s+(\d+(?:\.\d+)?)s\.?\s*$")
        .expect("Invalid tool summary regex")
});

impl TranscriptBuilder {
    /// Rebuild a transcript from a session log.
    ///
    /// The output always starts with the welcome message. `tool` entries
    /// accumulate into the open assistant message; an `assistant` entry
    /// closes it and a `user` entry closes it before standing alone.
    pub fn replay_history(&mut self, entries: &[HistoryEntry]) -> Vec<Message> {
        let mut output = vec![Message::welcome()];
        let mut open: Option<TurnState> = None;

        for entry in entries {
            match entry.role {
                HistoryRole::User => {
                    if let Some(state) = open.take() {
                        output.push(state.message);
                    }
                    let mut state =
                        TurnState::new(self.new_message(MessageRole::User, entry.timestamp()));
                    state.push_text(&entry.content);
                    output.push(state.message);
                }
                HistoryRole::Tool => {
                    let state = open.get_or_insert_with(|| {
                        TurnState::new(
                            self.new_message(MessageRole::Assistant, entry.timestamp()),
                        )
                    });
                    let mut call = classify_tool_output(&entry.content);
                    call.call_id = format!(
                        "history-{}-{}",
                        state.message.id,
                        state.message.blocks.len()
                    );
                    state.upsert_tool_call(call, true);
                }
                HistoryRole::Assistant => {
                    let mut state = open.take().unwrap_or_else(|| {
                        TurnState::new(
                            self.new_message(MessageRole::Assistant, entry.timestamp()),
                        )
                    });
                    state.push_text(&entry.content);
                    output.push(state.message);
                }
            }
        }

        if let Some(state) = open {
            debug!(id = state.message.id, "History ended inside a tool sequence");
            output.push(state.message);
        }

        output
    }
}

/// Best-effort recovery of a tool descriptor from logged tool output.
///
/// Recognises run summaries such as `search(query=rust) completed in 0.5s.`
/// and JSON objects naming a tool. Anything else becomes a generic `tool`
/// call whose result is the raw text. The returned `call_id` is empty.
pub fn classify_tool_output(content: &str) -> ToolCall {
    if let Some(caps) = TOOL_SUMMARY_REGEX.captures(content) {
        let mut call = ToolCall::new("", &caps[1]);
        call.arguments = parse_call_arguments(&caps[2]);
        call.duration = caps[3].parse().ok();
        return call;
    }

    if let Ok(v @ Value::Object(_)) = serde_json::from_str::<Value>(content.trim()) {
        let mut call = tool_call_from_json(&v);
        if !call.name.is_empty() {
            call.call_id.clear();
            if call.result.is_none() {
                call.result = v.get("content").and_then(Value::as_str).map(String::from);
            }
            return call;
        }
    }

    ToolCall::new("", GENERIC_TOOL_NAME).with_result(content)
}

/// Parse `key=value, key2=value2` as written inside a call summary.
fn parse_call_arguments(raw: &str) -> Map<String, Value> {
    split_top_level(raw)
        .into_iter()
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), parse_argument_value(value.trim())))
        })
        .collect()
}

/// Split on commas that are outside quotes and brackets
fn split_top_level(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in raw.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&raw[start..]);
    parts.into_iter().filter(|p| !p.trim().is_empty()).collect()
}

fn parse_argument_value(raw: &str) -> Value {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        return v;
    }
    if let Some(inner) = raw
        .strip_prefix('\'')
        .and_then(|r| r.strip_suffix('\''))
    {
        return Value::String(inner.to_string());
    }
    match raw {
        "True" => Value::Bool(true),
        "False" => Value::Bool(false),
        "None" => Value::Null,
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentBlock, WELCOME_MESSAGE_ID};
    use serde_json::json;

    fn entry(role: HistoryRole, content: &str, created_at: i64) -> HistoryEntry {
        HistoryEntry::new(role, content, created_at)
    }

    #[test]
    fn test_replay_user_then_assistant() {
        let mut builder = TranscriptBuilder::new();
        let messages = builder.replay_history(&[
            entry(HistoryRole::User, "hi", 100),
            entry(HistoryRole::Assistant, "hello", 101),
        ]);

        assert_eq!(messages.len(), 3);
        assert!(messages[0].is_welcome());
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].full_text, "hi");
        assert_eq!(messages[2].role, MessageRole::Assistant);
        assert_eq!(
            messages[2].blocks,
            vec![ContentBlock::Text {
                content: "hello".to_string(),
                order: 0
            }]
        );
        assert_eq!(messages[1].created_at.timestamp(), 100);
    }

    #[test]
    fn test_replay_tool_then_assistant() {
        let mut builder = TranscriptBuilder::new();
        let messages = builder.replay_history(&[
            entry(HistoryRole::Tool, "result X", 100),
            entry(HistoryRole::Assistant, "done", 101),
        ]);

        assert_eq!(messages.len(), 2);
        let turn = &messages[1];
        assert_eq!(turn.role, MessageRole::Assistant);
        assert_eq!(turn.blocks.len(), 2);
        match &turn.blocks[0] {
            ContentBlock::ToolCompleted { call, order } => {
                assert_eq!(*order, 0);
                assert_eq!(call.name, GENERIC_TOOL_NAME);
                assert_eq!(call.result.as_deref(), Some("result X"));
            }
            other => panic!("expected completed tool block, got {:?}", other),
        }
        assert_eq!(
            turn.blocks[1],
            ContentBlock::Text {
                content: "done".to_string(),
                order: 1
            }
        );
        assert_eq!(turn.full_text, "done");
        assert_eq!(turn.created_at.timestamp(), 100);
    }

    #[test]
    fn test_user_seals_open_tool_sequence() {
        let mut builder = TranscriptBuilder::new();
        let messages = builder.replay_history(&[
            entry(HistoryRole::Tool, "a", 1),
            entry(HistoryRole::Tool, "b", 2),
            entry(HistoryRole::User, "next", 3),
        ]);

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].blocks.len(), 2);
        assert_eq!(messages[1].blocks[1].order(), 1);
        assert_eq!(messages[2].role, MessageRole::User);
    }

    #[test]
    fn test_empty_assistant_entry_keeps_text_block() {
        let mut builder = TranscriptBuilder::new();
        let messages = builder.replay_history(&[
            entry(HistoryRole::Tool, "result X", 1),
            entry(HistoryRole::Assistant, "", 2),
            entry(HistoryRole::Assistant, "", 3),
        ]);

        assert_eq!(messages.len(), 3);
        assert_eq!(
            messages[1].blocks[1],
            ContentBlock::Text {
                content: String::new(),
                order: 1
            }
        );
        assert_eq!(
            messages[2].blocks,
            vec![ContentBlock::Text {
                content: String::new(),
                order: 0
            }]
        );
    }

    #[test]
    fn test_log_ending_mid_tool_sequence_is_sealed() {
        let mut builder = TranscriptBuilder::new();
        let messages = builder.replay_history(&[
            entry(HistoryRole::User, "q", 1),
            entry(HistoryRole::Tool, "partial", 2),
        ]);

        assert_eq!(messages.len(), 3);
        assert!(messages[2].full_text.is_empty());
        assert_eq!(messages[2].blocks.len(), 1);
    }

    #[test]
    fn test_empty_log_is_only_welcome() {
        let mut builder = TranscriptBuilder::new();
        let messages = builder.replay_history(&[]);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, WELCOME_MESSAGE_ID);
    }

    #[test]
    fn test_replay_ids_share_live_counter() {
        let mut builder = TranscriptBuilder::new();
        let messages = builder.replay_history(&[
            entry(HistoryRole::User, "hi", 1),
            entry(HistoryRole::Assistant, "hello", 2),
        ]);
        let turn = builder.begin_turn();

        let last_replayed = messages.last().unwrap().id;
        assert!(builder.message(turn).unwrap().id > last_replayed);
    }

    #[test]
    fn test_classify_run_summary() {
        let call = classify_tool_output(
            "duckduckgo_search(query=rust async, max_results=5) completed in 0.8421s.",
        );
        assert_eq!(call.name, "duckduckgo_search");
        assert_eq!(call.arguments.get("query"), Some(&json!("rust async")));
        assert_eq!(call.arguments.get("max_results"), Some(&json!(5)));
        assert_eq!(call.duration, Some(0.8421));
        assert!(call.result.is_none());
    }

    #[test]
    fn test_classify_summary_with_quoted_commas() {
        let call = classify_tool_output(r#"lookup(city="Paris, FR", exact=True) completed in 1s."#);
        assert_eq!(call.name, "lookup");
        assert_eq!(call.arguments.get("city"), Some(&json!("Paris, FR")));
        assert_eq!(call.arguments.get("exact"), Some(&json!(true)));
    }

    #[test]
    fn test_classify_summary_without_arguments() {
        let call = classify_tool_output("get_time() completed in 0.01s.");
        assert_eq!(call.name, "get_time");
        assert!(call.arguments.is_empty());
    }

    #[test]
    fn test_classify_json_tool_object() {
        let call = classify_tool_output(
            r#"{"tool_name": "calculator", "tool_args": {"expr": "2+2"}, "content": "4"}"#,
        );
        assert_eq!(call.name, "calculator");
        assert_eq!(call.arguments.get("expr"), Some(&json!("2+2")));
        assert_eq!(call.result.as_deref(), Some("4"));
        assert!(call.call_id.is_empty());
    }

    #[test]
    fn test_classify_fallback() {
        let call = classify_tool_output(r#"{"temperature": 21}"#);
        assert_eq!(call.name, GENERIC_TOOL_NAME);
        assert_eq!(call.result.as_deref(), Some(r#"{"temperature": 21}"#));

        let call = classify_tool_output("plain text output");
        assert_eq!(call.name, GENERIC_TOOL_NAME);
    }
}
