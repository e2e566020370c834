//! Endpoint and batch configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default per-request timeout (5 seconds).
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Endpoints fetched when no configuration overrides them.
pub const DEFAULT_ENDPOINTS: [&str; 3] = [
    "https://api.example.com/data1",
    "https://api.example.com/data2",
    "https://api.example.com/data3",
];

/// A single HTTP URL target.
///
/// The URL is not validated here; a malformed URL surfaces as a request
/// failure when it is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(String);

impl Endpoint {
    /// Create a new endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Get the URL.
    pub fn url(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Endpoint {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for Endpoint {
    fn from(url: String) -> Self {
        Self(url)
    }
}

/// Configuration for one batch: which endpoints to fetch and how long each
/// request may take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanoutConfig {
    /// Endpoints, in the order results are reported.
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<Endpoint>,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Optional connect timeout in milliseconds (bounded by `timeout_ms`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_ms: Option<u64>,
}

fn default_endpoints() -> Vec<Endpoint> {
    DEFAULT_ENDPOINTS.iter().copied().map(Endpoint::from).collect()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Whole milliseconds, saturating at `u64::MAX`. A non-zero duration below
/// one millisecond rounds up to 1 so it never becomes a zero timeout.
fn duration_to_ms(duration: Duration) -> u64 {
    let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    if ms == 0 && !duration.is_zero() {
        1
    } else {
        ms
    }
}

impl FanoutConfig {
    /// Create a configuration with explicit endpoints and timeout.
    pub fn new<E: Into<Endpoint>>(
        endpoints: impl IntoIterator<Item = E>,
        timeout: Duration,
    ) -> Self {
        Self {
            endpoints: endpoints.into_iter().map(Into::into).collect(),
            timeout_ms: duration_to_ms(timeout),
            connect_timeout_ms: None,
        }
    }

    /// Append an endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<Endpoint>) -> Self {
        self.endpoints.push(endpoint.into());
        self
    }

    /// Replace the endpoint list.
    pub fn with_endpoints<E: Into<Endpoint>>(mut self, endpoints: impl IntoIterator<Item = E>) -> Self {
        self.endpoints = endpoints.into_iter().map(Into::into).collect();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = duration_to_ms(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = Some(duration_to_ms(timeout));
        self
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Connect timeout, never longer than the per-request timeout.
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms
            .map(|ms| Duration::from_millis(ms.min(self.timeout_ms)))
    }
}

impl Default for FanoutConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            connect_timeout_ms: None,
        }
    }
}
