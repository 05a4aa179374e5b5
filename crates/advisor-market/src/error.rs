//! Error types for market data operations

use thiserror::Error;

/// Market data specific errors
#[derive(Debug, Error)]
pub enum MarketError {
    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A CSS selector or page could not be parsed
    #[error("HTML parse error: {0}")]
    HtmlError(String),

    /// Malformed base URL
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for market data operations
pub type Result<T> = std::result::Result<T, MarketError>;

/// Market errors reach the agent layer only while the tools are wired up;
/// once running, tools report failures as observations.
impl From<MarketError> for advisor_core::Error {
    fn from(err: MarketError) -> Self {
        match err {
            MarketError::ConfigError(msg) => advisor_core::Error::InitializationFailed(msg),
            other => advisor_core::Error::InitializationFailed(other.to_string()),
        }
    }
}
