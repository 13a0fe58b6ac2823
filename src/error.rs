//! Error types for the SQL Assistant

use thiserror::Error;

/// Result type alias for SQL Assistant operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the SQL Assistant
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid timestamp or time range
    #[error("Temporal error: {0}")]
    Temporal(String),

    /// Both bounds are needed before SQL can be generated
    #[error("Date range required: {0}")]
    MissingRange(String),

    /// Query construction errors
    #[error("Query error: {0}")]
    Query(String),

    /// Errors reported by a query execution backend
    #[error("Execution error: {0}")]
    Execution(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Configuration(e.to_string())
    }
}

impl From<chrono::ParseError> for Error {
    fn from(e: chrono::ParseError) -> Self {
        Error::Temporal(e.to_string())
    }
}
