//! Chat session: one conversation driven end to end.
//!
//! Owns the transcript, the builder that extends it, the agent client and
//! the session store. Turns are serialised by `&mut self`.

use futures_util::StreamExt;
use tracing::{info, warn};

use crate::adapters::ReqwestHttpClient;
use crate::client::AgentClient;
use crate::error::RambotResult;
use crate::models::{Message, RunRequest};
use crate::sse::StreamEvent;
use crate::storage::SessionStore;
use crate::traits::HttpClient;
use crate::transcript::{TranscriptBuilder, TranscriptError, TurnId};

/// A conversation with the agent.
pub struct ChatSession<C: HttpClient = ReqwestHttpClient> {
    client: AgentClient<C>,
    store: SessionStore,
    builder: TranscriptBuilder,
    transcript: Vec<Message>,
}

impl<C: HttpClient> ChatSession<C> {
    /// Start with a transcript holding only the welcome message.
    pub fn new(client: AgentClient<C>, store: SessionStore) -> Self {
        Self {
            client,
            store,
            builder: TranscriptBuilder::new(),
            transcript: vec![Message::welcome()],
        }
    }

    /// Messages in display order, welcome first
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Session the next message continues, if any
    pub fn session_id(&self) -> Option<&str> {
        self.store.session_id()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Send `text` and stream the reply into the transcript.
    ///
    /// `on_event` sees every event together with the assistant message as
    /// it stands after the event was applied. On a transport failure the
    /// partial reply stays in the transcript with an inline notice and the
    /// error is returned.
    pub async fn send_message<F>(&mut self, text: &str, mut on_event: F) -> RambotResult<&Message>
    where
        F: FnMut(&StreamEvent, &Message),
    {
        let user_message = self.builder.push_user_message(text);
        self.transcript.push(user_message);

        let request = RunRequest::new(text, self.store.user_id())
            .with_session(self.store.session_id().map(String::from));

        let turn = self.builder.begin_turn();
        let outcome = self.run_turn(turn, &request, &mut on_event).await;
        let mut message = self.builder.take_turn(turn)?;

        let result = match outcome {
            Ok(in_band_error) => {
                message.error = in_band_error;
                Ok(())
            }
            Err(err) => {
                warn!(
                    code = err.error_code(),
                    category = %err.category(),
                    retryable = err.is_retryable(),
                    error = %err,
                    "Run failed"
                );
                message.error = Some(err.user_message());
                Err(err)
            }
        };

        self.transcript.push(message);
        result?;
        self.transcript
            .last()
            .ok_or_else(|| TranscriptError::UnknownTurn(turn).into())
    }

    /// Drive one run. Returns the last in-band error message, if the agent
    /// reported one without breaking the stream.
    async fn run_turn<F>(
        &mut self,
        turn: TurnId,
        request: &RunRequest,
        on_event: &mut F,
    ) -> RambotResult<Option<String>>
    where
        F: FnMut(&StreamEvent, &Message),
    {
        let mut events = self.client.stream_run(request).await?;
        let mut in_band_error = None;
        let mut session_captured = request.session_id.is_some();

        while let Some(item) = events.next().await {
            let event = item?;
            self.builder.apply_event(turn, &event)?;

            match &event {
                StreamEvent::RunCompleted {
                    session_id: Some(session_id),
                } if !session_captured => {
                    session_captured = true;
                    info!(session_id = %session_id, "Captured new session");
                    if let Err(err) = self.store.save_session_id(session_id) {
                        warn!(error = %err, "Could not persist session id");
                    }
                }
                StreamEvent::Error { message } => {
                    warn!(message = %message, "Agent reported an error");
                    in_band_error = Some(message.clone());
                }
                _ => {}
            }

            on_event(&event, self.builder.message(turn)?);
        }

        Ok(in_band_error)
    }

    /// Replace the transcript with the saved session's history.
    ///
    /// Without a saved session the transcript is reset to the welcome
    /// message. Returns the number of replayed messages, welcome excluded.
    pub async fn resume(&mut self) -> RambotResult<usize> {
        let Some(session_id) = self.store.session_id().map(String::from) else {
            self.transcript = vec![Message::welcome()];
            return Ok(0);
        };

        let history = self.client.fetch_history(&session_id).await?;
        self.transcript = self.builder.replay_history(&history);
        Ok(self.transcript.len().saturating_sub(1))
    }

    /// Forget the current session and start over from the welcome message.
    pub fn new_conversation(&mut self) -> RambotResult<()> {
        self.store.clear_session()?;
        self.transcript = vec![Message::welcome()];
        info!("Started a new conversation");
        Ok(())
    }
}
