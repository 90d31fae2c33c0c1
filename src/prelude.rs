//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```ignore
//! use rambot::prelude::*;
//! ```
//!
//! This will import:
//! - The chat session, client and configuration
//! - Model types (Message, ContentBlock, ToolCall, HistoryEntry)
//! - Stream parsing (SseParser, StreamEvent)
//! - Transcript building (TranscriptBuilder, TurnId)
//! - Error types (RambotError, RambotResult)

// Session wiring
pub use crate::chat::ChatSession;
pub use crate::client::AgentClient;
pub use crate::config::ClientConfig;
pub use crate::storage::SessionStore;

// Model types
pub use crate::models::{
    ContentBlock, HistoryEntry, HistoryRole, Message, MessageRole, RunRequest, ToolCall,
};

// Stream parsing
pub use crate::sse::{event_stream, EventStream, SseParser, StreamEvent};

// Transcript building
pub use crate::transcript::{TranscriptBuilder, TurnId};

// Errors
pub use crate::error::{RambotError, RambotResult};
