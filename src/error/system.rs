//! System-related error types.
//!
//! Errors from the local session store: filesystem access and the JSON
//! state file.

use std::path::PathBuf;
use thiserror::Error;

/// System-specific error variants.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SystemError {
    /// Permission denied for file/directory operation.
    #[error("Permission denied: cannot {operation} '{}'", path.display())]
    PermissionDenied { path: PathBuf, operation: String },

    /// Generic I/O error.
    #[error("I/O error during {operation} on '{}': {message}", path.display())]
    IoError {
        operation: String,
        path: PathBuf,
        message: String,
    },

    /// The state file exists but is not valid JSON.
    #[error("Corrupt state file '{}': {message}", path.display())]
    CorruptState { path: PathBuf, message: String },

    /// Could not determine a data directory.
    #[error("Could not determine a data directory")]
    NoDataDirectory,
}

impl SystemError {
    /// Check if this error might resolve on its own.
    pub fn is_transient(&self) -> bool {
        matches!(self, SystemError::IoError { .. })
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            SystemError::PermissionDenied { path, .. } => {
                format!("Permission denied for '{}'.", path.display())
            }
            SystemError::IoError { path, .. } => {
                format!("Could not access '{}'.", path.display())
            }
            SystemError::CorruptState { path, .. } => format!(
                "The saved session in '{}' is unreadable and will be replaced.",
                path.display()
            ),
            SystemError::NoDataDirectory => {
                "Could not find a place to store session data. Set RAMBOT_DATA_DIR.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SystemError::PermissionDenied { .. } => "E_SYS_PERM",
            SystemError::IoError { .. } => "E_SYS_IO",
            SystemError::CorruptState { .. } => "E_SYS_STATE",
            SystemError::NoDataDirectory => "E_SYS_NODIR",
        }
    }
}

/// Classify an I/O error on `path` into a SystemError.
pub fn classify_io_error(err: std::io::Error, path: PathBuf, operation: &str) -> SystemError {
    match err.kind() {
        std::io::ErrorKind::PermissionDenied => SystemError::PermissionDenied {
            path,
            operation: operation.to_string(),
        },
        _ => SystemError::IoError {
            operation: operation.to_string(),
            path,
            message: err.to_string(),
        },
    }
}
