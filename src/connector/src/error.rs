//! Error types for the connector

use redis_iam_client::ClientError;
use redis_iam_core::CoreError;
use thiserror::Error;

/// Connector errors
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Fetch against the cluster API failed
    #[error("Cluster API error: {0}")]
    Client(#[from] ClientError),

    /// Graph value error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Resource handed to a syncer of another kind
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The discovery pass was cancelled between fetches
    #[error("Discovery pass cancelled")]
    Cancelled,
}

impl ConnectorError {
    /// Whether the error stems from cancellation, at any layer
    pub fn is_cancelled(&self) -> bool {
        match self {
            ConnectorError::Cancelled => true,
            ConnectorError::Client(err) => err.is_cancelled(),
            _ => false,
        }
    }
}

/// Result type for connector operations
pub type Result<T> = std::result::Result<T, ConnectorError>;
