//! Widget configuration parsed from environment variables.

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/chat";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_TITLE: &str = "Adarsh's AI Assistant";
pub const DEFAULT_GREETING: &str = "Hi, I'm Mait, Adarsh's AI assistant. Ask me anything about his work!";
pub const DEFAULT_PLACEHOLDER: &str = "Ask me anything...";
pub const DEFAULT_CONNECTION_ERROR: &str = "Sorry, I'm having trouble connecting.";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid CHAT_ENDPOINT '{value}': {reason}")]
    InvalidEndpoint { value: String, reason: String },

    #[error("{var} must not be blank")]
    BlankCopy { var: &'static str },
}

/// Timeouts applied to the HTTP client. A `request_secs` of zero leaves the
/// request timeout unset so the transport default applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for TransportTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

/// Fixed strings shown by the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetCopy {
    pub title: String,
    /// Seeded as the first assistant message when the panel opens on an empty log.
    pub greeting: String,
    pub placeholder: String,
    /// Shown when a send fails and the service gave no message of its own.
    pub connection_error: String,
}

impl Default for WidgetCopy {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            connection_error: DEFAULT_CONNECTION_ERROR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub endpoint: reqwest::Url,
    pub timeouts: TransportTimeouts,
    pub copy: WidgetCopy,
}

impl WidgetConfig {
    /// Build typed widget config from environment variables.
    ///
    /// All optional:
    /// - `CHAT_ENDPOINT`: assistant URL, default `http://localhost:5000/api/chat`
    /// - `CHAT_REQUEST_TIMEOUT_SECS`: default 30, `0` disables
    /// - `CHAT_CONNECT_TIMEOUT_SECS`: default 10
    /// - `CHAT_TITLE`, `CHAT_GREETING`: copy overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an absolute http(s) URL or a
    /// copy override is blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint = parse_endpoint(std::env::var("CHAT_ENDPOINT").ok().as_deref())?;
        let timeouts = TransportTimeouts {
            request_secs: env_parse_u64("CHAT_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("CHAT_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        let mut copy = WidgetCopy::default();
        if let Some(title) = env_copy("CHAT_TITLE")? {
            copy.title = title;
        }
        if let Some(greeting) = env_copy("CHAT_GREETING")? {
            copy.greeting = greeting;
        }

        Ok(Self { endpoint, timeouts, copy })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_copy(var: &'static str) -> Result<Option<String>, ConfigError> {
    match std::env::var(var) {
        Ok(v) if v.trim().is_empty() => Err(ConfigError::BlankCopy { var }),
        Ok(v) => Ok(Some(v)),
        Err(_) => Ok(None),
    }
}

/// Parse an endpoint URL, defaulting when absent.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEndpoint`] for unparseable or non-http(s) URLs.
pub fn parse_endpoint(raw: Option<&str>) -> Result<reqwest::Url, ConfigError> {
    let value = raw.unwrap_or(DEFAULT_ENDPOINT).trim();
    let url = reqwest::Url::parse(value)
        .map_err(|e| ConfigError::InvalidEndpoint { value: value.to_string(), reason: e.to_string() })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEndpoint {
            value: value.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
