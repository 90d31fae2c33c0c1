//! SSE (Server-Sent Events) stream parser
//!
//! Parses the agent run stream. SSE format consists of:
//! - `event: <type>` - event type line, valid until the next blank line
//! - `data: <json>` - one JSON payload per line
//! - Empty line - signals end of event block
//! - Lines starting with `:` - comments (ignored)
//!
//! # Module structure
//! - `events` - Event type definitions (StreamEvent, EventKind, SseLine, SseParseError)
//! - `payloads` - Internal payload deserialization structs
//! - `parser` - Parsing logic (SseParser, parse_sse_line, parse_sse_event)
//! - `stream` - Byte stream to event stream adapter

mod events;
mod parser;
mod payloads;
mod stream;

// Re-export public types
pub use events::{EventKind, SseLine, SseParseError, StreamEvent};
pub use parser::{parse_sse_event, parse_sse_line, SseParser};
pub use stream::{event_stream, EventStream};

pub(crate) use parser::tool_call_from_json;
