//! Concurrent batch fetch and the invocation handler.
//!
//! This crate provides:
//! - `BatchExecutor` - Fan-out fetch of every endpoint, results in input order
//! - `BatchResult` - Ordered per-endpoint outcomes
//! - `BatchTracker` / `FetchStatus` - Per-fetch state machine
//! - `handle` / `invoke` - The `{statusCode, body}` invocation entry points

mod batch;
mod handler;
mod status;

pub use batch::*;
pub use handler::*;
pub use status::*;
