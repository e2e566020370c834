//! Timeout configuration for fetch operations.

use std::time::Duration;

use fanout_core::{FanoutConfig, DEFAULT_TIMEOUT_MS};

/// Timeout configuration for a fetch operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout, if tighter than the total.
    pub connect: Option<Duration>,
    /// Total operation timeout, measured from the start of each request.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Create a new timeout configuration.
    pub fn new(connect: Option<Duration>, total: Duration) -> Self {
        Self { connect, total }
    }

    /// Create from a single total timeout.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: None,
            total,
        }
    }

    /// Connect timeout to hand to the transport.
    pub fn connect_or_total(&self) -> Duration {
        self.connect.map_or(self.total, |c| c.min(self.total))
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from_total(Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }
}

impl From<&FanoutConfig> for TimeoutConfig {
    fn from(config: &FanoutConfig) -> Self {
        Self::new(config.connect_timeout(), config.timeout())
    }
}
