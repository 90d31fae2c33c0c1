//! Slash commands typed at the chat prompt.

/// Commands available inside the chat loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashCommand {
    /// Start a new conversation
    New,
    /// Reprint the transcript
    History,
    /// Show the welcome banner
    Home,
    /// Show information about the app
    About,
    Help,
    Quit,
}

impl SlashCommand {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "new" => Some(SlashCommand::New),
            "history" => Some(SlashCommand::History),
            "home" => Some(SlashCommand::Home),
            "about" => Some(SlashCommand::About),
            "help" | "?" => Some(SlashCommand::Help),
            "quit" | "exit" | "q" => Some(SlashCommand::Quit),
            _ => None,
        }
    }
}

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum PromptInput {
    /// Blank line
    Empty,
    /// Text to send to the agent
    Message(String),
    Command(SlashCommand),
    /// `/something` that is not a known command
    UnknownCommand(String),
}

/// Classify a line typed at the prompt.
pub fn parse_prompt(line: &str) -> PromptInput {
    let line = line.trim();
    if line.is_empty() {
        return PromptInput::Empty;
    }

    match line.strip_prefix('/') {
        Some(name) => {
            let name = name.trim().to_lowercase();
            match SlashCommand::from_name(&name) {
                Some(command) => PromptInput::Command(command),
                None => PromptInput::UnknownCommand(name),
            }
        }
        None => PromptInput::Message(line.to_string()),
    }
}

/// Help text for the chat prompt
pub const PROMPT_HELP: &str = "\
Commands:
  /new       Start a new conversation
  /history   Show the whole conversation again
  /home      Show the welcome screen
  /about     About this app
  /help      Show this help
  /quit      Leave";
