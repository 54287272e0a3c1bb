//! Transport types — the adapter trait, its error, and the wire payloads.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by a single send to the assistant service.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request never produced an HTTP response (DNS, refused, timeout).
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("service responded with status {status}")]
    Status { status: u16, message: Option<String> },

    /// A success response whose body had no usable reply.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl TransportError {
    /// Human-readable message supplied by the service, if it sent one.
    #[must_use]
    pub fn service_message(&self) -> Option<&str> {
        match self {
            Self::Status { message: Some(m), .. } => Some(m),
            _ => None,
        }
    }

    /// Stable code for log fields.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "E_REQUEST",
            Self::Status { .. } => "E_STATUS",
            Self::Parse(_) => "E_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Request body: `{"message": "..."}`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Success body. `reply` is optional here so a missing field is reported as
/// a parse failure rather than a serde error string.
#[derive(Debug, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: Option<serde_json::Value>,
}

/// Error body. Only the `error` string is consumed.
#[derive(Debug, Deserialize)]
pub struct ChatErrorBody {
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

// =============================================================================
// TRANSPORT TRAIT
// =============================================================================

/// Sends one user message to the assistant and resolves with its reply.
///
/// Implementations make exactly one attempt per call. Retrying, queueing
/// and single-flight are not their concern.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send `message` (already trimmed) and return the reply text.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the request fails, the service answers
    /// with a non-success status, or the body carries no reply.
    async fn send(&self, message: &str) -> Result<String, TransportError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
