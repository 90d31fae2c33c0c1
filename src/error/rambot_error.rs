//! Unified error type for the Rambot client.

use thiserror::Error;

use super::category::ErrorCategory;
use super::network::NetworkError;
use super::stream::StreamError;
use super::system::SystemError;
use crate::transcript::TranscriptError;

/// Unified error type for the Rambot client.
///
/// Every fallible library operation eventually returns one of these, so the
/// front end can classify, log, and present failures the same way.
#[derive(Debug, Error)]
pub enum RambotError {
    /// Network-related errors (connections, HTTP, timeouts).
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Errors that ended an SSE run.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Session store errors.
    #[error(transparent)]
    System(#[from] SystemError),

    /// Misuse of the transcript builder.
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
}

impl RambotError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            RambotError::Network(NetworkError::HttpStatus { status, .. }) if *status >= 500 => {
                ErrorCategory::Server
            }
            RambotError::Network(NetworkError::Api { .. }) => ErrorCategory::Server,
            RambotError::Network(NetworkError::HttpStatus { .. })
            | RambotError::Network(NetworkError::InvalidResponse { .. }) => ErrorCategory::Client,
            RambotError::Network(_) => ErrorCategory::Network,
            RambotError::Stream(StreamError::Rejected { .. }) => ErrorCategory::Server,
            RambotError::Stream(_) => ErrorCategory::Network,
            RambotError::System(_) => ErrorCategory::System,
            RambotError::Transcript(_) => ErrorCategory::Client,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            RambotError::Network(err) => err.is_retryable(),
            RambotError::Stream(err) => err.is_retryable(),
            RambotError::System(err) => err.is_transient(),
            RambotError::Transcript(_) => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            RambotError::Network(err) => err.user_message(),
            RambotError::Stream(err) => err.user_message(),
            RambotError::System(err) => err.user_message(),
            RambotError::Transcript(err) => err.to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            RambotError::Network(err) => err.error_code(),
            RambotError::Stream(err) => err.error_code(),
            RambotError::System(err) => err.error_code(),
            RambotError::Transcript(_) => "E_TRANSCRIPT",
        }
    }
}
