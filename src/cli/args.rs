//! Command-line argument parsing for the rambot binary.

use thiserror::Error;

/// Options for an interactive chat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatOptions {
    /// Overrides `RAMBOT_API_URL`
    pub api_url: Option<String>,
    /// Overrides `RAMBOT_AGENT_ID`
    pub agent_id: Option<String>,
    /// Start a new conversation instead of resuming the saved one
    pub new_conversation: bool,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the interactive chat (default)
    Chat(ChatOptions),
}

/// Errors from malformed arguments.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ArgsError {
    /// A flag that takes a value was last on the command line.
    #[error("Missing value for {0}")]
    MissingValue(String),
}

/// Usage text printed by `--help`
pub const USAGE: &str = "\
Usage: rambot [OPTIONS]

Options:
  --api-url <URL>   API base URL (env: RAMBOT_API_URL)
  --agent <ID>      Agent id (env: RAMBOT_AGENT_ID)
  --new             Start a new conversation
  -V, --version     Print version
  -h, --help        Print help";

/// Parse command-line arguments and return the appropriate command.
///
/// Unknown flags are ignored. `--version` and `--help` win over everything
/// else on the line.
///
/// # Examples
///
/// ```
/// use rambot::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["rambot".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut options = ChatOptions::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline_value) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        match flag.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--new" => options.new_conversation = true,
            "--api-url" => {
                options.api_url = Some(flag_value(&flag, inline_value, &mut args)?);
            }
            "--agent" => {
                options.agent_id = Some(flag_value(&flag, inline_value, &mut args)?);
            }
            _ => {}
        }
    }

    Ok(CliCommand::Chat(options))
}

fn flag_value<I>(flag: &str, inline: Option<String>, rest: &mut I) -> Result<String, ArgsError>
where
    I: Iterator<Item = String>,
{
    inline
        .or_else(|| rest.next())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}
