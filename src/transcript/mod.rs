//! Transcript reconstruction.
//!
//! Turns stream events (live path) or a session log (replay path) into
//! messages made of ordered content blocks.
//!
//! # Module structure
//! - `builder` - TranscriptBuilder and the live append operations
//! - `replay` - History replay and tool output classification

mod builder;
mod replay;

use std::fmt;

use thiserror::Error;

pub use builder::TranscriptBuilder;
pub use replay::{classify_tool_output, GENERIC_TOOL_NAME};

/// Handle to an assistant turn under construction.
///
/// Wraps the id of the message the turn produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnId(pub(crate) i64);

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turn-{}", self.0)
    }
}

/// Errors from misuse of the transcript builder
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TranscriptError {
    /// The turn was never started or was already taken.
    #[error("Unknown turn: {0}")]
    UnknownTurn(TurnId),
}
