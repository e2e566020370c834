//! Core types for the concurrent fetch orchestrator.
//!
//! This crate provides the fundamental types shared by the other crates:
//! - `Endpoint` - A single HTTP URL target
//! - `FanoutConfig` - Endpoint list and timeout for a batch
//! - `InvocationId` - Identifier correlating logs and metrics of one invocation
//! - `InvocationResponse` - The `{statusCode, body}` envelope returned to the trigger

mod config;
mod context;
mod invocation;

pub use config::*;
pub use context::*;
pub use invocation::*;
