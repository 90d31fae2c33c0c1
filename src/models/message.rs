use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tools::ToolCall;

/// Fixed id of the welcome message that opens every transcript
pub const WELCOME_MESSAGE_ID: i64 = 1;

/// Text of the welcome message
pub const WELCOME_TEXT: &str = "Hello! Welcome to our chat app. How can I help you today?";

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One renderable unit of a message, positioned by `order`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { content: String, order: u32 },
    ToolStarted { call: ToolCall, order: u32 },
    ToolCompleted { call: ToolCall, order: u32 },
}

impl ContentBlock {
    /// Render position within the owning message
    pub fn order(&self) -> u32 {
        match self {
            ContentBlock::Text { order, .. }
            | ContentBlock::ToolStarted { order, .. }
            | ContentBlock::ToolCompleted { order, .. } => *order,
        }
    }

    /// The tool call carried by this block, if any
    pub fn tool_call(&self) -> Option<&ToolCall> {
        match self {
            ContentBlock::Text { .. } => None,
            ContentBlock::ToolStarted { call, .. } | ContentBlock::ToolCompleted { call, .. } => {
                Some(call)
            }
        }
    }
}

/// A conversation turn, built incrementally while streaming or rebuilt from history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Unique for the lifetime of the client session
    pub id: i64,
    pub role: MessageRole,
    /// Concatenation of every text block
    pub full_text: String,
    /// Blocks in render order
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
    pub created_at: DateTime<Utc>,
    /// Inline failure notice when the run that produced this message failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Message {
    /// Create an empty message
    pub fn new(id: i64, role: MessageRole, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            role,
            full_text: String::new(),
            blocks: Vec::new(),
            created_at,
            error: None,
        }
    }

    /// The fixed assistant greeting shown before any conversation content
    pub fn welcome() -> Self {
        let mut message = Self::new(WELCOME_MESSAGE_ID, MessageRole::Assistant, Utc::now());
        message.full_text = WELCOME_TEXT.to_string();
        message.blocks.push(ContentBlock::Text {
            content: WELCOME_TEXT.to_string(),
            order: 0,
        });
        message
    }

    pub fn is_welcome(&self) -> bool {
        self.id == WELCOME_MESSAGE_ID
    }

    /// Check if any tool call is still running
    pub fn has_running_tools(&self) -> bool {
        self.blocks
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolStarted { .. }))
    }
}
