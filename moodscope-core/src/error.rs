//! Error types for moodscope-core
//!
//! The aggregation engine itself never fails. These errors only cover the
//! ambient layer: configuration, logging setup and snapshot decoding.

use thiserror::Error;

/// Main error type for the moodscope-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Logging could not be initialized
    #[error("logging error: {0}")]
    Logging(String),
}

/// Result type alias for moodscope-core
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::Logging("subscriber already set".to_string());
        assert_eq!(err.to_string(), "logging error: subscriber already set");

        let err = Error::Config("insights.top_emotions must be at least 1".to_string());
        assert!(err.to_string().starts_with("configuration error:"));

        let err: Error = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }
}
