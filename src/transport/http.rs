//! HTTP transport — one JSON POST per message.
//!
//! The client keeps a cookie store so session cookies set by the assistant
//! service ride along on later sends.

use std::time::Duration;

use tracing::debug;

use super::types::{ChatErrorBody, ChatReply, ChatRequest, Transport, TransportError};
use crate::config::TransportTimeouts;

pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpTransport {
    /// Build a transport posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::HttpClientBuild`] if the client cannot be built.
    pub fn new(endpoint: reqwest::Url, timeouts: TransportTimeouts) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .connect_timeout(Duration::from_secs(timeouts.connect_secs));
        if timeouts.request_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeouts.request_secs));
        }
        let http = builder
            .build()
            .map_err(|e| TransportError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, endpoint })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, message: &str) -> Result<String, TransportError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        debug!(status, body_len = text.len(), "transport: response received");

        parse_response(status, &text)
    }
}

// =============================================================================
// RESPONSE CLASSIFICATION
// =============================================================================

/// Turn a raw status + body into the reply text or a typed failure.
pub(crate) fn parse_response(status: u16, body: &str) -> Result<String, TransportError> {
    if !(200..300).contains(&status) {
        return Err(TransportError::Status { status, message: parse_error_message(body) });
    }

    let parsed: ChatReply = serde_json::from_str(body).map_err(|e| TransportError::Parse(e.to_string()))?;
    match parsed.reply {
        Some(serde_json::Value::String(reply)) if !reply.trim().is_empty() => Ok(reply),
        Some(serde_json::Value::String(_)) => Err(TransportError::Parse("empty reply".into())),
        Some(_) => Err(TransportError::Parse("reply is not a string".into())),
        None => Err(TransportError::Parse("missing reply field".into())),
    }
}

fn parse_error_message(body: &str) -> Option<String> {
    let parsed: ChatErrorBody = serde_json::from_str(body).ok()?;
    let message = parsed.error?;
    let message = message.as_str()?.trim();
    (!message.is_empty()).then(|| message.to_string())
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
