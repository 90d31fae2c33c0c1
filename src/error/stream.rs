//! Streaming-related error types.
//!
//! Errors that terminate an SSE run after the response started. Malformed
//! frames are not errors; the parser drops them.

use thiserror::Error;

use crate::traits::HttpError;

/// Stream-specific error variants.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StreamError {
    /// Stream connection was lost mid-response.
    #[error("Stream connection lost: {message}")]
    ConnectionLost { message: String },

    /// No data arrived within the transport timeout.
    #[error("Stream timed out: {message}")]
    Timeout { message: String },

    /// The server refused to open the stream.
    #[error("Stream rejected by server ({status}): {message}")]
    Rejected { status: u16, message: String },
}

impl StreamError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            StreamError::ConnectionLost { .. } | StreamError::Timeout { .. } => true,
            StreamError::Rejected { status, .. } => *status >= 500,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::ConnectionLost { .. } => {
                "Connection to the server was lost before the reply finished.".to_string()
            }
            StreamError::Timeout { .. } => {
                "The server stopped responding. The reply may be incomplete.".to_string()
            }
            StreamError::Rejected { status, .. } => {
                format!("The server could not start a reply (HTTP {}).", status)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::ConnectionLost { .. } => "E_STREAM_CONN",
            StreamError::Timeout { .. } => "E_STREAM_TIMEOUT",
            StreamError::Rejected { .. } => "E_STREAM_REJECTED",
        }
    }
}

impl From<HttpError> for StreamError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Timeout(message) => StreamError::Timeout { message },
            HttpError::ServerError { status, message } => StreamError::Rejected { status, message },
            other => StreamError::ConnectionLost {
                message: other.to_string(),
            },
        }
    }
}
