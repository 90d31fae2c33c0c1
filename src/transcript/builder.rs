//! Live append path: turns stream events into ordered content blocks.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::{TranscriptError, TurnId};
use crate::models::{ContentBlock, Message, MessageRole, ToolCall, WELCOME_MESSAGE_ID};
use crate::sse::StreamEvent;

/// Construction state of one message.
///
/// `call_index` maps a tool call id to the position of its block, so a
/// completion can replace the started block without moving it.
#[derive(Debug)]
pub(crate) struct TurnState {
    pub(crate) message: Message,
    call_index: HashMap<String, usize>,
    next_order: u32,
}

impl TurnState {
    pub(crate) fn new(message: Message) -> Self {
        Self {
            message,
            call_index: HashMap::new(),
            next_order: 0,
        }
    }

    fn take_order(&mut self) -> u32 {
        let order = self.next_order;
        self.next_order += 1;
        order
    }

    /// Push a new text block, even if the last block is text.
    pub(crate) fn push_text(&mut self, content: &str) {
        let order = self.take_order();
        self.message.blocks.push(ContentBlock::Text {
            content: content.to_string(),
            order,
        });
        self.message.full_text.push_str(content);
    }

    pub(crate) fn append_text(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }

        if let Some(ContentBlock::Text { content, .. }) = self.message.blocks.last_mut() {
            content.push_str(fragment);
            self.message.full_text.push_str(fragment);
        } else {
            self.push_text(fragment);
        }
    }

    pub(crate) fn upsert_tool_call(&mut self, call: ToolCall, completed: bool) {
        let index = match self.call_index.get(&call.call_id).copied() {
            Some(index) => index,
            None => {
                let order = self.take_order();
                self.call_index
                    .insert(call.call_id.clone(), self.message.blocks.len());
                self.message.blocks.push(if completed {
                    ContentBlock::ToolCompleted { call, order }
                } else {
                    ContentBlock::ToolStarted { call, order }
                });
                return;
            }
        };

        let Some(block) = self.message.blocks.get_mut(index) else {
            warn!(call_id = %call.call_id, "Tool call index points past the block list");
            return;
        };

        let promoted = match block {
            ContentBlock::ToolStarted {
                call: existing,
                order,
            } => {
                existing.merge_from(call);
                if completed {
                    Some(ContentBlock::ToolCompleted {
                        call: std::mem::take(existing),
                        order: *order,
                    })
                } else {
                    None
                }
            }
            ContentBlock::ToolCompleted { call: existing, .. } => {
                warn!(
                    call_id = %existing.call_id,
                    completed,
                    "Ignoring event for an already completed tool call"
                );
                None
            }
            ContentBlock::Text { .. } => {
                warn!(call_id = %call.call_id, "Tool call index points at a text block");
                None
            }
        };

        if let Some(promoted) = promoted {
            *block = promoted;
        }
    }
}

/// Builds the transcript of one conversation.
///
/// Message ids come from a single counter shared by live turns, user
/// messages and replayed history, so they never collide within a session.
#[derive(Debug)]
pub struct TranscriptBuilder {
    next_id: i64,
    turns: HashMap<TurnId, TurnState>,
}

impl TranscriptBuilder {
    pub fn new() -> Self {
        Self {
            next_id: WELCOME_MESSAGE_ID + 1,
            turns: HashMap::new(),
        }
    }

    /// Allocate the next message id
    pub(crate) fn next_message_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn new_message(&mut self, role: MessageRole, created_at: DateTime<Utc>) -> Message {
        let id = self.next_message_id();
        Message::new(id, role, created_at)
    }

    /// Start an assistant turn with an empty block list.
    pub fn begin_turn(&mut self) -> TurnId {
        let message = self.new_message(MessageRole::Assistant, Utc::now());
        let turn = TurnId(message.id);
        self.turns.insert(turn, TurnState::new(message));
        debug!(turn = %turn, "Began assistant turn");
        turn
    }

    /// Append streamed text to the turn.
    ///
    /// Extends the last block when it is text, otherwise opens a new text
    /// block. Empty fragments change nothing.
    pub fn append_text(&mut self, turn: TurnId, fragment: &str) -> Result<(), TranscriptError> {
        self.turn_mut(turn)?.append_text(fragment);
        Ok(())
    }

    /// Record a tool call event.
    ///
    /// A started block is promoted in place on completion and keeps its
    /// order. Completed blocks are terminal; later events for the same call
    /// are logged and ignored.
    pub fn upsert_tool_call(
        &mut self,
        turn: TurnId,
        call: ToolCall,
        completed: bool,
    ) -> Result<(), TranscriptError> {
        self.turn_mut(turn)?.upsert_tool_call(call, completed);
        Ok(())
    }

    /// Apply one stream event to the turn. Run completion and in-band
    /// errors carry no block content and are left to the caller.
    pub fn apply_event(&mut self, turn: TurnId, event: &StreamEvent) -> Result<(), TranscriptError> {
        match event {
            StreamEvent::Content { text } => self.append_text(turn, text),
            StreamEvent::ToolCallStarted { call } => {
                self.upsert_tool_call(turn, call.clone(), false)
            }
            StreamEvent::ToolCallCompleted { call } => {
                self.upsert_tool_call(turn, call.clone(), true)
            }
            StreamEvent::RunCompleted { .. } | StreamEvent::Error { .. } => {
                self.turn_mut(turn).map(|_| ())
            }
        }
    }

    /// Borrow the message under construction
    pub fn message(&self, turn: TurnId) -> Result<&Message, TranscriptError> {
        self.turns
            .get(&turn)
            .map(|state| &state.message)
            .ok_or(TranscriptError::UnknownTurn(turn))
    }

    /// Remove the turn from the builder and hand back its message
    pub fn take_turn(&mut self, turn: TurnId) -> Result<Message, TranscriptError> {
        self.turns
            .remove(&turn)
            .map(|state| state.message)
            .ok_or(TranscriptError::UnknownTurn(turn))
    }

    /// Create a user message holding `text` as its only block
    pub fn push_user_message(&mut self, text: &str) -> Message {
        let mut state = TurnState::new(self.new_message(MessageRole::User, Utc::now()));
        state.push_text(text);
        state.message
    }

    fn turn_mut(&mut self, turn: TurnId) -> Result<&mut TurnState, TranscriptError> {
        self.turns
            .get_mut(&turn)
            .ok_or(TranscriptError::UnknownTurn(turn))
    }
}

impl Default for TranscriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
