//! CLI module for rambot.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - Slash commands for the interactive chat
//!
//! # Usage
//!
//! ```ignore
//! use rambot::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args())? {
//!     CliCommand::Version => println!("{}", rambot::cli::version_line()),
//!     CliCommand::Help => println!("{}", rambot::cli::USAGE),
//!     CliCommand::Chat(options) => run_chat(options).await?,
//! }
//! ```

pub mod args;
pub mod commands;
pub mod version;

pub use args::{parse_args, ArgsError, ChatOptions, CliCommand, USAGE};
pub use commands::{parse_prompt, PromptInput, SlashCommand, PROMPT_HELP};
pub use version::{version_line, VERSION};
