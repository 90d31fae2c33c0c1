use rambot::chat::ChatSession;
use rambot::cli::{
    parse_args, parse_prompt, version_line, ChatOptions, CliCommand, PromptInput, SlashCommand,
    PROMPT_HELP, USAGE, VERSION,
};
use rambot::cli_output::{
    write_about, write_home, write_transcript, write_warning, StreamPrinter,
};
use rambot::client::AgentClient;
use rambot::config::ClientConfig;
use rambot::storage::SessionStore;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log to stderr so records never interleave with the transcript on stdout.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "rambot=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn build_config(options: &ChatOptions) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &options.api_url {
        config = config.with_api_url(url.clone());
    }
    if let Some(agent) = &options.agent_id {
        config = config.with_agent_id(agent.clone());
    }
    config
}

fn prompt() -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()
}

async fn run_chat(options: ChatOptions) -> Result<()> {
    let config = build_config(&options);
    let api_url = config.api_url.clone();

    let data_dir = config.resolve_data_dir()?;
    let store = SessionStore::open(&data_dir).wrap_err("Failed to open session store")?;
    let client = AgentClient::from_config(config).wrap_err("Failed to create HTTP client")?;
    let mut session = ChatSession::new(client, store);

    write_home(&mut io::stdout())?;

    if options.new_conversation {
        if let Err(e) = session.new_conversation() {
            warn!(error = %e, "Could not clear the saved session");
        }
    } else {
        match session.resume().await {
            Ok(0) => {}
            Ok(count) => debug!(count, "Resumed conversation"),
            Err(e) => {
                warn!(error = %e, "Failed to load chat history");
                write_warning(&mut io::stdout(), &e.user_message())?;
            }
        }
    }
    write_transcript(&mut io::stdout(), session.transcript())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_prompt(&line) {
            PromptInput::Empty => continue,
            PromptInput::Command(SlashCommand::Quit) => break,
            PromptInput::Command(SlashCommand::New) => {
                if let Err(e) = session.new_conversation() {
                    write_warning(&mut io::stdout(), &e.user_message())?;
                }
                write_transcript(&mut io::stdout(), session.transcript())?;
            }
            PromptInput::Command(SlashCommand::History) => {
                write_transcript(&mut io::stdout(), session.transcript())?;
            }
            PromptInput::Command(SlashCommand::Home) => write_home(&mut io::stdout())?,
            PromptInput::Command(SlashCommand::About) => {
                write_about(&mut io::stdout(), VERSION, &api_url)?
            }
            PromptInput::Command(SlashCommand::Help) => println!("{}", PROMPT_HELP),
            PromptInput::UnknownCommand(name) => {
                write_warning(
                    &mut io::stdout(),
                    &format!("Unknown command /{}. Type /help for commands.", name),
                )?;
            }
            PromptInput::Message(text) => {
                let mut printer = StreamPrinter::new(io::stdout());
                let result = session
                    .send_message(&text, |event, _| {
                        if let Err(e) = printer.print_event(event) {
                            debug!(error = %e, "Failed to print event");
                        }
                    })
                    .await;

                let (notice, retryable) = match &result {
                    Ok(message) => (message.error.clone(), false),
                    Err(e) => (Some(e.user_message()), e.category().is_retryable()),
                };
                printer.finish(notice.as_deref())?;
                if retryable {
                    write_warning(&mut io::stdout(), "Send the message again to retry.")?;
                }
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let options = match command {
        CliCommand::Version => {
            println!("{}", version_line());
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Chat(options) => options,
    };

    color_eyre::install()?;
    init_tracing();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_chat(options))
}
