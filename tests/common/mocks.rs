//! Mock implementations for test fixtures.
//!
//! This module re-exports the mock implementations from `rambot::adapters::mock`
//! and provides a builder for configuring them.

pub use rambot::adapters::mock::{MockHttpClient, MockResponse};
pub use rambot::traits::{HttpError, Response};

use bytes::Bytes;

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    /// Creates a new mock HTTP configuration.
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures a successful JSON response.
    pub fn with_json_response(self, url: &str, status: u16, json: &str) -> Self {
        self.client.set_response(
            url,
            MockResponse::Success(Response::new(status, Bytes::from(json.to_string()))),
        );
        self
    }

    /// Configures an SSE body delivered as the given chunks.
    pub fn with_stream(self, url: &str, chunks: &[&str]) -> Self {
        self.client.set_response(
            url,
            MockResponse::Stream(chunks.iter().map(|c| Bytes::from(c.to_string())).collect()),
        );
        self
    }

    /// Configures an SSE body that breaks off with `error` after `chunks`.
    pub fn with_broken_stream(self, url: &str, chunks: &[&str], error: HttpError) -> Self {
        self.client.set_response(
            url,
            MockResponse::StreamThenError(
                chunks.iter().map(|c| Bytes::from(c.to_string())).collect(),
                error,
            ),
        );
        self
    }

    /// Configures an error response.
    pub fn with_error_response(self, url: &str, status: u16, message: &str) -> Self {
        self.client.set_response(
            url,
            MockResponse::Error(HttpError::ServerError {
                status,
                message: message.to_string(),
            }),
        );
        self
    }

    /// Builds the configured MockHttpClient.
    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
