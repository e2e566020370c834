//! Invocation response envelope.

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Response handed back to the external trigger.
///
/// The body is the JSON-encoded batch. Per-endpoint failures travel inside
/// the body, so the status is always 200.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    /// HTTP-style status code.
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON-encoded payload.
    pub body: String,
}

impl InvocationResponse {
    /// Wrap an already-encoded body in a 200 response.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            body: body.into(),
        }
    }

    /// Encode `payload` as JSON and wrap it in a 200 response.
    pub fn from_payload<T: Serialize>(payload: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::ok(serde_json::to_string(payload)?))
    }

    /// Status as an `http::StatusCode`.
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Decode the body back into JSON.
    pub fn body_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
