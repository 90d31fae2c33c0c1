//! Rambot - a terminal client for a streaming agent backend
//!
//! Parses the agent's SSE run stream, rebuilds replies into ordered content
//! blocks, and replays past sessions. This library exposes modules for use
//! in integration tests and benchmarks.

pub mod adapters;
pub mod chat;
pub mod cli;
pub mod cli_output;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod prelude;
pub mod sse;
pub mod storage;
pub mod traits;
pub mod transcript;
