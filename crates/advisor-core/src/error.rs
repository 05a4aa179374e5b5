//! Error types for advisor-core

use thiserror::Error;

/// Result type alias for advisor-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for agent operations
///
/// Only errors that escape the reasoning loop end up here. Tool failures
/// and malformed model output are turned into observations instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Agent initialization failed
    #[error("Agent initialization failed: {0}")]
    InitializationFailed(String),

    /// The language model could not be reached or rejected the request
    #[error("Language model request failed: {0}")]
    ModelFailed(String),

    /// Prompt template could not be rendered
    #[error("Prompt rendering failed: {0}")]
    PromptFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ModelFailed("HTTP 401".to_string());
        assert_eq!(err.to_string(), "Language model request failed: HTTP 401");

        let err = Error::InitializationFailed("Provider not set".to_string());
        assert_eq!(err.to_string(), "Agent initialization failed: Provider not set");
    }
}
