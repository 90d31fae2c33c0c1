//! Agent API client for backend communication.
//!
//! Opens streaming runs and fetches session history. The transport is any
//! [`HttpClient`], so tests can swap in the mock adapter.

use tracing::{debug, info};

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::NetworkError;
use crate::models::{HistoryEntry, HistoryResponse, RunRequest};
use crate::sse::{event_stream, EventStream};
use crate::traits::{Headers, HttpClient};

/// Client for the agent runs and sessions endpoints.
pub struct AgentClient<C: HttpClient = ReqwestHttpClient> {
    http: C,
    config: ClientConfig,
}

impl AgentClient<ReqwestHttpClient> {
    /// Create a client backed by reqwest, honouring the configured connect timeout.
    pub fn from_config(config: ClientConfig) -> Result<Self, NetworkError> {
        let http = ReqwestHttpClient::with_connect_timeout(config.connect_timeout)
            .map_err(|e| NetworkError::from_http(&config.api_url, e))?;
        Ok(Self::new(http, config))
    }
}

impl<C: HttpClient> AgentClient<C> {
    /// Create a client over an arbitrary transport.
    pub fn new(http: C, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Start a run and stream its events.
    ///
    /// Sends `POST {api_url}/agents/{agent_id}/runs` as a form. Errors before
    /// the first byte arrive here; errors after that arrive on the stream.
    pub async fn stream_run(&self, request: &RunRequest) -> Result<EventStream, NetworkError> {
        let url = self.config.runs_url();

        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );

        debug!(
            url = %url,
            continuing = request.session_id.is_some(),
            "Opening agent run"
        );

        let body = self
            .http
            .post_stream(&url, &request.to_form_body(), &headers)
            .await
            .map_err(|e| NetworkError::from_http(&url, e))?;

        Ok(event_stream(body))
    }

    /// Fetch the log of a past session.
    ///
    /// Sends `GET {api_url}/sessions/{id}?type=agent`. A `success: false`
    /// envelope becomes [`NetworkError::Api`].
    pub async fn fetch_history(&self, session_id: &str) -> Result<Vec<HistoryEntry>, NetworkError> {
        let url = self.config.session_url(session_id);

        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        let response = self
            .http
            .get(&url, &headers)
            .await
            .map_err(|e| NetworkError::from_http(&url, e))?;

        if !response.is_success() {
            return Err(NetworkError::HttpStatus {
                status: response.status,
                message: response.text(),
            });
        }

        let envelope: HistoryResponse =
            response
                .json()
                .map_err(|e| NetworkError::InvalidResponse {
                    message: e.to_string(),
                })?;

        if !envelope.success {
            return Err(NetworkError::Api {
                message: envelope
                    .message
                    .unwrap_or_else(|| "Failed to load chat history".to_string()),
            });
        }

        let history = envelope.data.map(|d| d.history).unwrap_or_default();
        info!(session_id, entries = history.len(), "Loaded session history");
        Ok(history)
    }
}
