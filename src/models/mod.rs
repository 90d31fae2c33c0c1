mod history;
mod message;
mod request;
mod tools;

pub use history::{HistoryData, HistoryEntry, HistoryResponse, HistoryRole};
pub use message::*;
pub use request::RunRequest;
pub use tools::ToolCall;
