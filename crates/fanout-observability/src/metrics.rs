//! Per-batch timing metrics.

use std::time::Duration;

use chrono::{DateTime, Utc};
use fanout_core::InvocationId;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Metrics for one batch invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchMetrics {
    /// Invocation ID for correlation.
    pub invocation_id: String,
    /// Wall-clock start of the batch.
    pub started_at: DateTime<Utc>,
    /// Per-endpoint metrics, in input order.
    pub endpoints: Vec<EndpointMetrics>,
    /// Total batch duration (microseconds).
    pub total_duration_us: u64,
    /// Number of endpoints that returned a JSON body.
    pub succeeded: usize,
    /// Number of endpoints that failed.
    pub failed: usize,
}

/// Metrics for a single endpoint fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointMetrics {
    /// URL fetched.
    pub url: String,
    /// Fetch duration (microseconds).
    pub duration_us: u64,
    /// Outcome label (`succeeded`, `timeout`, `request_failed`, `parse_failed`).
    pub outcome: String,
    /// Whether the fetch succeeded.
    pub success: bool,
    /// Error message if failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Collector for batch metrics.
///
/// Timed with `tokio::time::Instant`, the same clock callers use for
/// per-endpoint durations.
#[derive(Debug)]
pub struct MetricsCollector {
    invocation_id: InvocationId,
    started_at: DateTime<Utc>,
    start: Instant,
    endpoints: Vec<EndpointMetrics>,
}

impl MetricsCollector {
    /// Create a new metrics collector; the batch clock starts now.
    pub fn new(invocation_id: InvocationId) -> Self {
        Self {
            invocation_id,
            started_at: Utc::now(),
            start: Instant::now(),
            endpoints: Vec::new(),
        }
    }

    /// Record one endpoint fetch. Call in input order.
    pub fn record_endpoint(
        &mut self,
        url: &str,
        duration: Duration,
        outcome: &str,
        success: bool,
        error: Option<String>,
    ) {
        self.endpoints.push(EndpointMetrics {
            url: url.to_string(),
            duration_us: duration.as_micros() as u64,
            outcome: outcome.to_string(),
            success,
            error,
        });
    }

    /// Get the invocation ID.
    pub fn invocation_id(&self) -> &InvocationId {
        &self.invocation_id
    }

    /// Get total elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Finalize and return the metrics.
    pub fn finalize(self) -> BatchMetrics {
        let total_duration_us = self.start.elapsed().as_micros() as u64;
        let succeeded = self.endpoints.iter().filter(|e| e.success).count();
        let failed = self.endpoints.len() - succeeded;

        BatchMetrics {
            invocation_id: self.invocation_id.to_string(),
            started_at: self.started_at,
            endpoints: self.endpoints,
            total_duration_us,
            succeeded,
            failed,
        }
    }
}

impl BatchMetrics {
    /// Slowest single fetch (microseconds), zero for an empty batch.
    pub fn slowest_us(&self) -> u64 {
        self.endpoints.iter().map(|e| e.duration_us).max().unwrap_or(0)
    }

    /// Sum of all fetch durations (microseconds).
    ///
    /// Compared with `total_duration_us` this shows how much time the
    /// concurrent fan-out saved over fetching one after another.
    pub fn sequential_us(&self) -> u64 {
        self.endpoints.iter().map(|e| e.duration_us).sum()
    }

    /// Format as JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Format as JSON (pretty printed).
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Format as human-readable summary.
    pub fn to_summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Invocation: {}", self.invocation_id));
        lines.push(format!(
            "  Started: {}",
            self.started_at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
        ));
        lines.push(format!(
            "  Endpoints: {} ({} succeeded, {} failed)",
            self.endpoints.len(),
            self.succeeded,
            self.failed
        ));
        lines.push(format!(
            "  Total: {}us ({:.2}ms)",
            self.total_duration_us,
            self.total_duration_us as f64 / 1000.0
        ));

        for (index, endpoint) in self.endpoints.iter().enumerate() {
            let status = if endpoint.success {
                "OK".to_string()
            } else {
                endpoint.outcome.to_uppercase()
            };
            lines.push(format!(
                "    #{} [{}]: {}us ({:.2}ms) - {}",
                index,
                status,
                endpoint.duration_us,
                endpoint.duration_us as f64 / 1000.0,
                endpoint.url
            ));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector() -> MetricsCollector {
        MetricsCollector::new(InvocationId::from_string("inv-1"))
    }

    #[test]
    fn test_finalize_counts() {
        let mut metrics = collector();
        metrics.record_endpoint("http://a", Duration::from_millis(10), "succeeded", true, None);
        metrics.record_endpoint(
            "http://b",
            Duration::from_millis(30),
            "timeout",
            false,
            Some("Timeout occurred for http://b".to_string()),
        );

        let batch = metrics.finalize();

        assert_eq!(batch.invocation_id, "inv-1");
        assert_eq!(batch.succeeded, 1);
        assert_eq!(batch.failed, 1);
        assert_eq!(batch.endpoints[0].url, "http://a");
        assert_eq!(batch.endpoints[1].outcome, "timeout");
    }

    #[test]
    fn test_slowest_and_sequential() {
        let mut metrics = collector();
        metrics.record_endpoint("http://a", Duration::from_micros(100), "succeeded", true, None);
        metrics.record_endpoint("http://b", Duration::from_micros(300), "succeeded", true, None);

        let batch = metrics.finalize();

        assert_eq!(batch.slowest_us(), 300);
        assert_eq!(batch.sequential_us(), 400);
    }

    #[tokio::test(start_paused = true)]
    async fn test_total_duration_follows_runtime_clock() {
        let mut metrics = collector();
        let start = Instant::now();
        tokio::time::sleep(Duration::from_millis(250)).await;
        metrics.record_endpoint("http://a", start.elapsed(), "succeeded", true, None);

        let batch = metrics.finalize();

        assert_eq!(batch.endpoints[0].duration_us, 250_000);
        assert!(batch.total_duration_us >= batch.slowest_us());
        assert!(batch.total_duration_us < 260_000);
    }

    #[test]
    fn test_empty_batch() {
        let batch = collector().finalize();

        assert!(batch.endpoints.is_empty());
        assert_eq!(batch.succeeded, 0);
        assert_eq!(batch.failed, 0);
        assert_eq!(batch.slowest_us(), 0);
    }

    #[test]
    fn test_summary_lists_endpoints_in_order() {
        let mut metrics = collector();
        metrics.record_endpoint("http://first", Duration::from_millis(1), "succeeded", true, None);
        metrics.record_endpoint("http://second", Duration::from_millis(2), "request_failed", false, None);

        let summary = metrics.finalize().to_summary();

        assert!(summary.contains("Invocation: inv-1"));
        assert!(summary.contains("1 succeeded, 1 failed"));
        let first = summary.find("http://first").unwrap();
        let second = summary.find("http://second").unwrap();
        assert!(first < second);
        assert!(summary.contains("[REQUEST_FAILED]"));
    }

    #[test]
    fn test_json_skips_missing_error() {
        let mut metrics = collector();
        metrics.record_endpoint("http://a", Duration::ZERO, "succeeded", true, None);

        let json: serde_json::Value = serde_json::from_str(&metrics.finalize().to_json()).unwrap();

        assert!(json["endpoints"][0].get("error").is_none());
        assert_eq!(json["succeeded"], 1);
    }
}
