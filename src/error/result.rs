//! Result type alias for Rambot operations.

use super::rambot_error::RambotError;

/// Type alias for Results using RambotError.
pub type RambotResult<T> = Result<T, RambotError>;
