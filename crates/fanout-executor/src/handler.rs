//! Invocation entry points.
//!
//! `handle` is what an external trigger calls: a plain synchronous function
//! that runs the whole batch on its own runtime and returns the
//! `{statusCode, body}` envelope. `invoke` is the same work for callers that
//! already run inside a Tokio runtime.
//!
//! Per-endpoint failures never surface as errors here; they are embedded in
//! the 200 body. An `Err` means the invocation itself could not run (no
//! runtime, no HTTP client, body not encodable).

use anyhow::{Context, Result};
use fanout_core::{FanoutConfig, InvocationId, InvocationResponse};
use serde_json::Value;

use crate::batch::{BatchExecutor, BatchOutcome};

/// Handle one invocation with the built-in endpoint list.
///
/// The event carries no parameters and is ignored.
pub fn handle(event: &Value) -> Result<InvocationResponse> {
    handle_with_config(event, &FanoutConfig::default())
}

/// Handle one invocation with an explicit configuration.
///
/// Must not be called from inside a Tokio runtime; use [`invoke`] there.
pub fn handle_with_config(_event: &Value, config: &FanoutConfig) -> Result<InvocationResponse> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(invoke(config))
}

/// Run the batch described by `config` and wrap it in a 200 response.
pub async fn invoke(config: &FanoutConfig) -> Result<InvocationResponse> {
    let outcome = run_batch(config, InvocationId::generate()).await?;

    InvocationResponse::from_payload(&outcome.results).context("Failed to encode batch result")
}

/// Run the batch described by `config` and return results with metrics.
pub async fn run_batch(config: &FanoutConfig, invocation_id: InvocationId) -> Result<BatchOutcome> {
    let executor = BatchExecutor::from_config(config).context("Failed to build HTTP client")?;
    let outcome = executor.execute(&config.endpoints, invocation_id).await;

    tracing::debug!(metrics = %outcome.metrics.to_json(), "batch metrics");

    Ok(outcome)
}
