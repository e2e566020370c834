//! Logging and batch metrics for the fetch orchestrator.
//!
//! This crate provides:
//! - `init_logging` - `tracing` subscriber setup writing to stderr
//! - `MetricsCollector` / `BatchMetrics` - Per-endpoint timing for one batch

mod logging;
mod metrics;

pub use logging::*;
pub use metrics::*;

// Re-export InvocationId from fanout-core for convenience
pub use fanout_core::InvocationId;
