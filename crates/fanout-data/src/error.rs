//! Error types for fetch operations.

use std::fmt;
use std::time::Duration;

use fanout_core::Endpoint;

/// Why a single fetch failed.
///
/// Every variant carries the endpoint it belongs to. The display string is
/// the message reported in the batch output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request did not complete within the timeout window.
    #[error("Timeout occurred for {endpoint}")]
    Timeout { endpoint: Endpoint, after: Duration },

    /// Any other transport or protocol failure, including non-2xx statuses.
    #[error("Request failed for {endpoint}: {reason}")]
    RequestFailed {
        endpoint: Endpoint,
        status: Option<u16>,
        reason: String,
    },

    /// The response succeeded but its body is not valid JSON.
    #[error("Request failed for {endpoint}: invalid JSON body: {reason}")]
    ParseFailed { endpoint: Endpoint, reason: String },
}

impl FetchError {
    /// Create a timeout error.
    pub fn timeout(endpoint: &Endpoint, after: Duration) -> Self {
        Self::Timeout {
            endpoint: endpoint.clone(),
            after,
        }
    }

    /// Create a request error without a status code.
    pub fn request(endpoint: &Endpoint, reason: impl Into<String>) -> Self {
        Self::RequestFailed {
            endpoint: endpoint.clone(),
            status: None,
            reason: reason.into(),
        }
    }

    /// Create a request error for a non-success HTTP status.
    pub fn status(endpoint: &Endpoint, status: u16, reason: impl Into<String>) -> Self {
        Self::RequestFailed {
            endpoint: endpoint.clone(),
            status: Some(status),
            reason: reason.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(endpoint: &Endpoint, reason: impl Into<String>) -> Self {
        Self::ParseFailed {
            endpoint: endpoint.clone(),
            reason: reason.into(),
        }
    }

    /// The endpoint that failed.
    pub fn endpoint(&self) -> &Endpoint {
        match self {
            Self::Timeout { endpoint, .. }
            | Self::RequestFailed { endpoint, .. }
            | Self::ParseFailed { endpoint, .. } => endpoint,
        }
    }

    /// Which class of failure this is.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Timeout { .. } => FailureKind::Timeout,
            Self::RequestFailed { .. } => FailureKind::RequestFailed,
            Self::ParseFailed { .. } => FailureKind::ParseFailed,
        }
    }

    /// HTTP status code, when the failure came from one.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }

    /// Check if this is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Machine-inspectable failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Timeout,
    RequestFailed,
    ParseFailed,
}

impl FailureKind {
    /// Get the name of this failure class.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::RequestFailed => "request_failed",
            Self::ParseFailed => "parse_failed",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
