//! Concurrent fan-out over a batch of endpoints.

use std::time::Duration;

use fanout_core::{Endpoint, FanoutConfig, InvocationId};
use fanout_data::{FetchClient, FetchResult, HttpTransport, Transport};
use fanout_observability::{BatchMetrics, MetricsCollector};
use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use tokio::time::Instant;

use crate::status::{BatchTracker, FetchStatus};

/// Ordered per-endpoint outcomes of one batch.
///
/// The Nth entry belongs to the Nth input endpoint. Serializes as a JSON
/// array.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BatchResult(Vec<FetchResult>);

impl BatchResult {
    /// Wrap results that are already in input order.
    pub fn new(results: Vec<FetchResult>) -> Self {
        Self(results)
    }

    /// Number of results.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the batch had no endpoints.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the result for the endpoint at `index`.
    pub fn get(&self, index: usize) -> Option<&FetchResult> {
        self.0.get(index)
    }

    /// Iterate results in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, FetchResult> {
        self.0.iter()
    }

    /// Number of successful fetches.
    pub fn succeeded(&self) -> usize {
        self.0.iter().filter(|r| r.is_success()).count()
    }

    /// Number of failed fetches.
    pub fn failed(&self) -> usize {
        self.0.len() - self.succeeded()
    }

    /// Get the results as a slice.
    pub fn as_slice(&self) -> &[FetchResult] {
        &self.0
    }

    /// Unwrap into the underlying vector.
    pub fn into_inner(self) -> Vec<FetchResult> {
        self.0
    }

    /// Encode as a JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Encode as a pretty-printed JSON array.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl IntoIterator for BatchResult {
    type Item = FetchResult;
    type IntoIter = std::vec::IntoIter<FetchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a BatchResult {
    type Item = &'a FetchResult;
    type IntoIter = std::slice::Iter<'a, FetchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A completed batch together with its timing metrics.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Per-endpoint results in input order.
    pub results: BatchResult,
    /// Timing and outcome metrics.
    pub metrics: BatchMetrics,
}

/// Fans a batch of endpoints out over one shared fetch client.
#[derive(Debug, Clone)]
pub struct BatchExecutor<T = HttpTransport> {
    client: FetchClient<T>,
}

impl BatchExecutor<HttpTransport> {
    /// Create an executor with a `reqwest` client configured from `config`.
    pub fn from_config(config: &FanoutConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(FetchClient::from_config(config)?))
    }
}

impl<T: Transport> BatchExecutor<T> {
    /// Create an executor over an existing client.
    pub fn new(client: FetchClient<T>) -> Self {
        Self { client }
    }

    /// Get the fetch client.
    pub fn client(&self) -> &FetchClient<T> {
        &self.client
    }

    /// Fetch every endpoint concurrently and return results in input order.
    ///
    /// Never fails as a whole: each endpoint's failure is captured in its own
    /// slot.
    pub async fn fetch_all(&self, endpoints: &[Endpoint]) -> BatchResult {
        self.execute(endpoints, InvocationId::generate()).await.results
    }

    /// Like [`fetch_all`](Self::fetch_all), also returning batch metrics.
    #[tracing::instrument(
        level = "info",
        skip(self, endpoints, invocation_id),
        fields(invocation_id = %invocation_id, endpoints = endpoints.len())
    )]
    pub async fn execute(&self, endpoints: &[Endpoint], invocation_id: InvocationId) -> BatchOutcome {
        let mut metrics = MetricsCollector::new(invocation_id);
        let mut tracker = BatchTracker::new(endpoints.len());
        let mut finished: Vec<(usize, FetchResult, Duration)> = Vec::with_capacity(endpoints.len());

        let client = &self.client;
        let mut in_flight: FuturesUnordered<_> = endpoints
            .iter()
            .enumerate()
            .map(|(index, endpoint)| async move {
                let start = Instant::now();
                let result = client.fetch_one(endpoint).await;
                (index, result, start.elapsed())
            })
            .collect();

        // Completion order is arbitrary; results are put back in input order below.
        while let Some((index, result, elapsed)) = in_flight.next().await {
            let status = FetchStatus::from(&result);
            tracker.complete(index, status);
            tracing::debug!(
                index,
                status = status.label(),
                completed = tracker.completed(),
                total = tracker.len(),
                "fetch finished"
            );
            finished.push((index, result, elapsed));
        }
        debug_assert!(tracker.is_complete());

        finished.sort_unstable_by_key(|(index, _, _)| *index);

        let mut results = Vec::with_capacity(endpoints.len());
        for (endpoint, (_, result, elapsed)) in endpoints.iter().zip(finished) {
            let status = FetchStatus::from(&result);
            metrics.record_endpoint(
                endpoint.url(),
                elapsed,
                status.label(),
                result.is_success(),
                result.message(),
            );
            results.push(result);
        }

        let metrics = metrics.finalize();
        tracing::info!(
            succeeded = metrics.succeeded,
            failed = metrics.failed,
            total_ms = metrics.total_duration_us / 1000,
            "batch complete"
        );

        BatchOutcome {
            results: BatchResult::new(results),
            metrics,
        }
    }
}
