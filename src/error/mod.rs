//! Unified error handling for the Rambot client.
//!
//! - **Error Categories**: high-level classification for handling decisions
//! - **Domain-specific Errors**: Network, Stream and System errors
//! - **Unified Error Type**: `RambotError` consolidates all error types
//! - **Result Type Alias**: `RambotResult<T>` for consistent return types
//!
//! Malformed SSE frames and tool-call lifecycle anomalies never surface as
//! errors; the parser and the transcript builder absorb them.
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout, dropped stream | Yes |
//! | Server | 5xx, rejected runs, `success: false` | Yes |
//! | Client | 4xx, undecodable responses, bad turn ids | No |
//! | System | Session store filesystem errors | Sometimes |

mod category;
mod network;
mod rambot_error;
mod result;
mod stream;
mod system;

pub use category::ErrorCategory;
pub use network::NetworkError;
pub use rambot_error::RambotError;
pub use result::RambotResult;
pub use stream::StreamError;
pub use system::{classify_io_error, SystemError};
