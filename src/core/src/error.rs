//! Error types shared by the graph model
//!
//! Subsystem crates define their own error enums and convert from
//! [`CoreError`] where graph values are built or rendered.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while building or rendering graph values
#[derive(Debug, Error)]
pub enum CoreError {
    /// A value could not be interpreted (e.g. an unknown resource type name)
    #[error("Invalid: {0}")]
    Invalid(String),

    /// Graph could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CoreError {
    /// Create an invalid value error
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        CoreError::Invalid(msg.into())
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        CoreError::Serialization(msg.into())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}
