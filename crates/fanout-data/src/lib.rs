//! Per-endpoint fetch with timeouts and isolated failures.
//!
//! This crate provides:
//! - `FetchClient` - Single-attempt fetch that never propagates an error
//! - `Transport` / `HttpTransport` - The HTTP collaborator behind the client
//! - `FetchResult` - Success payload or structured failure for one endpoint
//! - `FetchError` - Timeout, request and parse failures
//! - `TimeoutConfig` - Per-request timeouts

mod client;
mod error;
mod result;
mod timeout;
mod transport;

pub use client::*;
pub use error::*;
pub use result::*;
pub use timeout::*;
pub use transport::*;
