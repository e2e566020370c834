//! Single-endpoint fetch client.

use fanout_core::{Endpoint, FanoutConfig};
use serde_json::Value;

use crate::error::FetchError;
use crate::result::FetchResult;
use crate::timeout::TimeoutConfig;
use crate::transport::{HttpTransport, Transport};

/// Fetch client with a per-request timeout.
///
/// Each fetch is a single attempt. Its timeout clock starts when that fetch
/// begins, independent of any other fetch running on the same client.
#[derive(Debug, Clone)]
pub struct FetchClient<T = HttpTransport> {
    transport: T,
    timeout: TimeoutConfig,
}

impl FetchClient<HttpTransport> {
    /// Create a client backed by `reqwest`.
    pub fn new(timeout: TimeoutConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_transport(HttpTransport::new(timeout)?, timeout))
    }

    /// Create a client from a batch configuration.
    pub fn from_config(config: &FanoutConfig) -> Result<Self, reqwest::Error> {
        Self::new(TimeoutConfig::from(config))
    }
}

impl<T: Transport> FetchClient<T> {
    /// Create a client over an explicit transport.
    pub fn with_transport(transport: T, timeout: TimeoutConfig) -> Self {
        Self { transport, timeout }
    }

    /// Get the timeout configuration.
    pub fn timeout(&self) -> &TimeoutConfig {
        &self.timeout
    }

    /// Get the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch one endpoint, capturing any failure as a `FetchResult`.
    #[tracing::instrument(level = "debug", skip(self, endpoint), fields(endpoint = %endpoint))]
    pub async fn fetch_one(&self, endpoint: &Endpoint) -> FetchResult {
        tracing::debug!("fetch started");

        match self.try_fetch(endpoint).await {
            Ok(body) => {
                tracing::debug!("fetch succeeded");
                FetchResult::success(body)
            }
            Err(error) => {
                tracing::warn!(kind = %error.kind(), error = %error, "fetch failed");
                FetchResult::failure(error)
            }
        }
    }

    /// Fetch one endpoint and return the raw outcome.
    pub async fn try_fetch(&self, endpoint: &Endpoint) -> Result<Value, FetchError> {
        match tokio::time::timeout(self.timeout.total, self.transport.get_json(endpoint)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::timeout(endpoint, self.timeout.total)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::error::FailureKind;

    /// Transport that answers after a fixed delay.
    struct DelayedTransport {
        delay: Duration,
        outcome: fn(&Endpoint) -> Result<Value, FetchError>,
    }

    #[async_trait]
    impl Transport for DelayedTransport {
        async fn get_json(&self, endpoint: &Endpoint) -> Result<Value, FetchError> {
            tokio::time::sleep(self.delay).await;
            (self.outcome)(endpoint)
        }
    }

    fn client(delay_ms: u64, outcome: fn(&Endpoint) -> Result<Value, FetchError>) -> FetchClient<DelayedTransport> {
        FetchClient::with_transport(
            DelayedTransport {
                delay: Duration::from_millis(delay_ms),
                outcome,
            },
            TimeoutConfig::from_total(Duration::from_secs(5)),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_one_success() {
        let client = client(100, |_| Ok(json!({"a": 1})));
        let result = client.fetch_one(&Endpoint::new("http://x/data1")).await;

        assert_eq!(result, FetchResult::success(json!({"a": 1})));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_one_times_out() {
        let client = client(10_000, |_| Ok(json!({})));
        let endpoint = Endpoint::new("http://x/data2");

        let start = tokio::time::Instant::now();
        let result = client.fetch_one(&endpoint).await;

        assert!(start.elapsed() >= Duration::from_secs(5));
        assert!(start.elapsed() < Duration::from_secs(10));
        let error = result.error().unwrap();
        assert_eq!(error.kind(), FailureKind::Timeout);
        assert_eq!(error.to_string(), "Timeout occurred for http://x/data2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_one_captures_transport_error() {
        let client = client(0, |ep| Err(FetchError::status(ep, 500, "server error")));
        let result = client.fetch_one(&Endpoint::new("http://x/data3")).await;

        let message = result.message().unwrap();
        assert!(message.starts_with("Request failed for http://x/data3"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_try_fetch_returns_raw_error() {
        let client = client(0, |ep| Err(FetchError::parse(ep, "eof")));
        let err = client.try_fetch(&Endpoint::new("http://x")).await.unwrap_err();

        assert_eq!(err.kind(), FailureKind::ParseFailed);
    }

    #[test]
    fn test_from_config_uses_config_timeout() {
        let config = FanoutConfig::default().with_timeout(Duration::from_millis(750));
        let client = FetchClient::from_config(&config).unwrap();

        assert_eq!(client.timeout().total, Duration::from_millis(750));
    }
}
