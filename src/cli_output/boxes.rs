//! Simple line-based terminal output for the chat views.

use std::io::{self, Write};

use crate::models::{ContentBlock, Message, MessageRole, ToolCall};

/// Line width for separators.
const LINE_WIDTH: usize = 60;

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const RUNNING: &str = "⠋";
}

/// Write a header.
///
/// ```text
/// RAMBOT
/// ════════════════════════════════════════════════════════════
/// ```
pub fn write_header<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "═".repeat(LINE_WIDTH))?;
    writeln!(out)
}

/// Write a thin separator.
pub fn write_separator<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "─".repeat(LINE_WIDTH))
}

/// Role prefix shown before a message
pub fn role_label(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => "you",
        MessageRole::Assistant => "rambot",
    }
}

/// One-line rendering of a tool block, without the leading indent.
///
/// ```text
/// ⠋ search(query="rust")
/// ✓ search(query="rust") 0.42s
/// ```
pub fn tool_line(call: &ToolCall, completed: bool) -> String {
    if !completed {
        return format!("{} {}", icons::RUNNING, call.summary());
    }
    match call.duration {
        Some(secs) => format!("{} {} {:.2}s", icons::SUCCESS, call.summary(), secs),
        None => format!("{} {}", icons::SUCCESS, call.summary()),
    }
}

/// Write a finished message with all of its blocks.
pub fn write_message<W: Write>(out: &mut W, message: &Message) -> io::Result<()> {
    writeln!(out, "{}:", role_label(message.role))?;
    for block in &message.blocks {
        match block {
            ContentBlock::Text { content, .. } => {
                for line in content.lines() {
                    writeln!(out, "  {}", line)?;
                }
            }
            ContentBlock::ToolStarted { call, .. } => writeln!(out, "  {}", tool_line(call, false))?,
            ContentBlock::ToolCompleted { call, .. } => writeln!(out, "  {}", tool_line(call, true))?,
        }
    }
    if let Some(notice) = &message.error {
        writeln!(out, "  {} {}", icons::FAILURE, notice)?;
    }
    writeln!(out)
}

/// Write a whole transcript.
pub fn write_transcript<W: Write>(out: &mut W, messages: &[Message]) -> io::Result<()> {
    for message in messages {
        write_message(out, message)?;
    }
    Ok(())
}

/// Write a warning line.
pub fn write_warning<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", icons::WARNING, message)
}

/// Write the home view.
pub fn write_home<W: Write>(out: &mut W) -> io::Result<()> {
    write_header(out, "RAMBOT")?;
    writeln!(out, "  Smart chatting with a tool-using agent.")?;
    writeln!(out)?;
    writeln!(out, "  Real-time     replies stream in as they are written")?;
    writeln!(out, "  Tools         see each tool the agent runs, live")?;
    writeln!(out, "  Sessions      pick up where you left off")?;
    writeln!(out)?;
    writeln!(out, "  Type a message to chat, or /help for commands.")?;
    writeln!(out)
}

/// Write the about view.
pub fn write_about<W: Write>(out: &mut W, version: &str, api_url: &str) -> io::Result<()> {
    write_header(out, "ABOUT")?;
    writeln!(out, "  rambot {}", version)?;
    writeln!(out, "  A terminal client for the Rambot agent.")?;
    writeln!(out)?;
    writeln!(out, "  Server:   {}", api_url)?;
    write_separator(out)?;
    writeln!(out, "  Thank you for trying this chat application!")?;
    writeln!(out)
}
