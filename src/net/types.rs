//! Wire types for the config and chat endpoints.
//!
//! DESIGN
//! ======
//! The backend owns these contracts; the client only mirrors the fields it
//! reads. Missing booleans deserialize as `false` so a partial config payload
//! degrades to a warning instead of a parse failure.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Response body of `GET {base}/api/config`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigStatus {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub has_deployment_id: bool,
    #[serde(default)]
    pub has_api_token: bool,
    /// Reported by the backend but not part of the connected check.
    #[serde(default)]
    pub has_endpoint: Option<bool>,
}

impl ConfigStatus {
    /// True when the backend reports both a deployment id and an API token.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.success && self.has_deployment_id && self.has_api_token
    }
}

/// Request body of `POST {base}/api/chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// One `data:` frame of the chat response stream.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct StreamPayload {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Failures surfaced while probing config or running a chat submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    /// The request never produced a response.
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// A response body could not be decoded into the expected payload.
    #[error("invalid response payload: {0}")]
    Payload(String),

    /// The stream carried an in-band `error` frame.
    #[error("{0}")]
    Stream(String),

    /// Reading the response body failed mid-stream.
    #[error("stream read failed: {0}")]
    Body(String),
}

impl ChatError {
    /// Gateway timeouts get their own notice instead of the generic one.
    #[must_use]
    pub fn is_gateway_timeout(&self) -> bool {
        self.to_string().contains("504")
    }
}
