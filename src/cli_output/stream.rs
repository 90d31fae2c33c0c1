//! Incremental printing of a reply while it streams.

use std::io::{self, Write};

use super::boxes::{icons, role_label, tool_line};
use crate::models::MessageRole;
use crate::sse::StreamEvent;

/// Prints stream events as they arrive.
///
/// Text is written without newlines so fragments join up on screen; tool
/// events get their own indented lines.
#[derive(Debug)]
pub struct StreamPrinter<W: Write> {
    out: W,
    started: bool,
    at_line_start: bool,
}

impl<W: Write> StreamPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            started: false,
            at_line_start: true,
        }
    }

    /// Print one event.
    pub fn print_event(&mut self, event: &StreamEvent) -> io::Result<()> {
        self.ensure_started()?;
        match event {
            StreamEvent::Content { text } => {
                if self.at_line_start {
                    write!(self.out, "  ")?;
                }
                // Keep continuation lines indented
                write!(self.out, "{}", text.replace('\n', "\n  "))?;
                self.at_line_start = false;
            }
            StreamEvent::ToolCallStarted { call } => {
                self.break_line()?;
                writeln!(self.out, "  {}", tool_line(call, false))?;
            }
            StreamEvent::ToolCallCompleted { call } => {
                self.break_line()?;
                writeln!(self.out, "  {}", tool_line(call, true))?;
            }
            StreamEvent::Error { message } => {
                self.break_line()?;
                writeln!(self.out, "  {} {}", icons::WARNING, message)?;
            }
            StreamEvent::RunCompleted { .. } => {}
        }
        self.out.flush()
    }

    /// End the reply, printing an inline failure notice if one is given.
    pub fn finish(&mut self, notice: Option<&str>) -> io::Result<()> {
        self.ensure_started()?;
        self.break_line()?;
        if let Some(notice) = notice {
            writeln!(self.out, "  {} {}", icons::FAILURE, notice)?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn ensure_started(&mut self) -> io::Result<()> {
        if !self.started {
            writeln!(self.out, "{}:", role_label(MessageRole::Assistant))?;
            self.started = true;
        }
        Ok(())
    }

    fn break_line(&mut self) -> io::Result<()> {
        if !self.at_line_start {
            writeln!(self.out)?;
            self.at_line_start = true;
        }
        Ok(())
    }
}
