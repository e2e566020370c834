//! Outcome of a single fetch.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::FetchError;

/// Success payload or structured failure for one endpoint.
///
/// Serializes as the body itself on success and as `{"error": "<message>"}`
/// on failure.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    /// The parsed response payload.
    Success { body: Value },
    /// The captured failure.
    Failure { error: FetchError },
}

impl FetchResult {
    /// Create a success result.
    pub fn success(body: Value) -> Self {
        Self::Success { body }
    }

    /// Create a failure result.
    pub fn failure(error: FetchError) -> Self {
        Self::Failure { error }
    }

    /// Check if the fetch succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Check if the fetch failed.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Get the body if the fetch succeeded.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Success { body } => Some(body),
            Self::Failure { .. } => None,
        }
    }

    /// Get the error if the fetch failed.
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    /// Human-readable failure message, if any.
    pub fn message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }
}

impl From<Result<Value, FetchError>> for FetchResult {
    fn from(result: Result<Value, FetchError>) -> Self {
        match result {
            Ok(body) => Self::success(body),
            Err(error) => Self::failure(error),
        }
    }
}

impl Serialize for FetchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success { body } => body.serialize(serializer),
            Self::Failure { error } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", &error.to_string())?;
                map.end()
            }
        }
    }
}
