//! SSE stream parsing logic
//!
//! Contains the stateful SseParser that reassembles lines across arbitrary
//! chunk boundaries, as well as the free parsing functions it dispatches to.

mod content;
mod misc;
mod tools;

use tracing::debug;

use crate::sse::events::{EventKind, SseLine, SseParseError, StreamEvent};

use content::{parse_content_event, parse_run_completed_event};
use misc::parse_error_event;
use tools::parse_tool_call_event;

pub(crate) use tools::tool_call_from_json;

/// Parse a single SSE line into its component type
pub fn parse_sse_line(line: &str) -> SseLine {
    let line = line.trim();
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim().to_string());
    }

    // Unknown line format - treat as comment
    SseLine::Comment(line.to_string())
}

/// Parse one data payload under the given event kind.
///
/// Returns `Ok(None)` for unknown kinds and for frames that carry nothing
/// to emit (empty content, tool events without a call id).
pub fn parse_sse_event(event_type: &str, data: &str) -> Result<Option<StreamEvent>, SseParseError> {
    match EventKind::from_name(event_type) {
        Some(EventKind::Content) => parse_content_event(event_type, data),
        Some(EventKind::RunCompleted) => parse_run_completed_event(event_type, data),
        Some(EventKind::ToolCallStarted) => parse_tool_call_event(event_type, data, false),
        Some(EventKind::ToolCallCompleted) => parse_tool_call_event(event_type, data, true),
        Some(EventKind::Error) => parse_error_event(event_type, data),
        None => {
            debug!(event_type, "Ignoring unknown SSE event");
            Ok(None)
        }
    }
}

/// Event kind named inside the payload itself, for frames sent without an
/// `event:` line.
fn embedded_event_type(data: &str) -> Option<String> {
    let v: serde_json::Value = serde_json::from_str(data).ok()?;
    v.get("event")
        .or_else(|| v.get("type"))
        .and_then(|t| t.as_str())
        .map(String::from)
}

/// Stateful SSE parser that accumulates chunks and emits complete events.
///
/// The output depends only on the concatenated input, never on where the
/// chunk boundaries fall.
#[derive(Debug, Default)]
pub struct SseParser {
    /// Unconsumed text after the last newline
    buffer: String,
    /// Trailing bytes of an incomplete UTF-8 sequence
    pending_bytes: Vec<u8>,
    /// Kind set by the last `event:` line of the current block
    current_event_type: Option<String>,
}

impl SseParser {
    /// Create a new SSE parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a raw byte chunk, returning every event completed by it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        let text = self.decode(chunk);
        self.feed_str(&text)
    }

    /// Feed an already-decoded text chunk.
    pub fn feed_str(&mut self, chunk: &str) -> Vec<StreamEvent> {
        self.buffer.push_str(chunk);

        let buffer = std::mem::take(&mut self.buffer);
        let mut events = Vec::new();
        let mut start = 0;
        while let Some(rel) = buffer[start..].find('\n') {
            let end = start + rel;
            let line = &buffer[start..end];
            let line = line.strip_suffix('\r').unwrap_or(line);
            if let Some(event) = self.feed_line(line) {
                events.push(event);
            }
            start = end + 1;
        }
        self.buffer = buffer[start..].to_string();
        events
    }

    /// Flush the trailing partial line at end of stream and reset.
    pub fn finish(&mut self) -> Vec<StreamEvent> {
        let mut rest = std::mem::take(&mut self.buffer);
        if !self.pending_bytes.is_empty() {
            rest.push_str(&String::from_utf8_lossy(&self.pending_bytes));
        }

        let rest = rest.strip_suffix('\r').unwrap_or(&rest).to_string();
        let events = self.feed_line(&rest).into_iter().collect();
        self.reset();
        events
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.pending_bytes.clear();
        self.current_event_type = None;
    }

    /// Process one complete line.
    fn feed_line(&mut self, line: &str) -> Option<StreamEvent> {
        match parse_sse_line(line) {
            SseLine::Event(event_type) => {
                self.current_event_type = Some(event_type);
                None
            }
            SseLine::Data(data) => self.dispatch(&data),
            SseLine::Empty => {
                // Empty line ends the block
                self.current_event_type = None;
                None
            }
            SseLine::Comment(_) => None,
        }
    }

    fn dispatch(&self, data: &str) -> Option<StreamEvent> {
        if data.is_empty() {
            return None;
        }

        let event_type = match &self.current_event_type {
            Some(t) => t.clone(),
            None => match embedded_event_type(data) {
                Some(t) => t,
                None => {
                    debug!("Ignoring data line without an event type");
                    return None;
                }
            },
        };

        match parse_sse_event(&event_type, data) {
            Ok(event) => event,
            Err(e) => {
                debug!(error = %e, "Dropping malformed SSE frame");
                None
            }
        }
    }

    /// Decode bytes, carrying an incomplete trailing sequence to the next
    /// chunk. Invalid sequences become U+FFFD.
    fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending_bytes);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest: &[u8] = &bytes;
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            self.pending_bytes = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }
}
