//! Terminal output for the chat: transcript rendering and live streaming.

mod boxes;
mod stream;

pub use boxes::*;
pub use stream::StreamPrinter;
