//! HTTP transport behind the fetch client.

use async_trait::async_trait;
use fanout_core::Endpoint;
use serde_json::Value;

use crate::error::FetchError;
use crate::timeout::TimeoutConfig;

/// Issues one GET and decodes the body as JSON.
///
/// Implementations must be usable from many concurrent fetches at once and
/// must report timeouts as `FetchError::Timeout`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `endpoint` and parse its body.
    async fn get_json(&self, endpoint: &Endpoint) -> Result<Value, FetchError>;
}

/// `reqwest`-backed transport sharing one connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: TimeoutConfig,
}

impl HttpTransport {
    /// Build a client whose timeouts match `timeout`.
    pub fn new(timeout: TimeoutConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout.total)
            .connect_timeout(timeout.connect_or_total())
            .build()?;

        Ok(Self { client, timeout })
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client, timeout: TimeoutConfig) -> Self {
        Self { client, timeout }
    }

    fn classify(&self, endpoint: &Endpoint, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::timeout(endpoint, self.timeout.total)
        } else if let Some(status) = err.status() {
            FetchError::status(endpoint, status.as_u16(), err.to_string())
        } else {
            FetchError::request(endpoint, err.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, endpoint: &Endpoint) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(endpoint.url())
            .send()
            .await
            .map_err(|e| self.classify(endpoint, e))?;

        let response = response
            .error_for_status()
            .map_err(|e| self.classify(endpoint, e))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.classify(endpoint, e))?;

        serde_json::from_slice(&bytes).map_err(|e| FetchError::parse(endpoint, e.to_string()))
    }
}
