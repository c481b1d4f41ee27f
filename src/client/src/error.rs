//! Error types for the cluster API client

use thiserror::Error;

/// Errors raised while talking to the cluster API
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing or invalid host, port or credentials
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request URL could not be built
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// Transport failure (connect, TLS, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// 401/403 from the API
    #[error("Authentication failed for {url} (status {status})")]
    Unauthorized { status: u16, url: String },

    /// 404 from the API
    #[error("Not found: {url}")]
    NotFound { url: String },

    /// Any other non-success status
    #[error("Unexpected status {status} from {url}: {body}")]
    Status { status: u16, url: String, body: String },

    /// Response body did not match the expected shape
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The caller cancelled the request
    #[error("Request cancelled")]
    Cancelled,
}

impl ClientError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        ClientError::Configuration(msg.into())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, ClientError::Configuration(_))
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized { status, .. } | ClientError::Status { status, .. } => Some(*status),
            ClientError::NotFound { .. } => Some(404),
            ClientError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
