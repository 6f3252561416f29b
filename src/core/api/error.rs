//! Error types for the recommendation client.

/// Result type alias using [`ClientError`].
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the recommendation service.
///
/// The TUI only ever shows the `Display` text of these, so every variant
/// renders as a single human-readable line.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The service answered with a non-success status.
    #[error("Failed to fetch recommendations (HTTP {status})")]
    Status { status: u16 },

    /// Connection refused, DNS failure, timeout, etc.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The body was not a valid page envelope.
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL or a server-issued locator is not a URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status } => Some(*status),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Network(e) if e.is_timeout())
    }
}
