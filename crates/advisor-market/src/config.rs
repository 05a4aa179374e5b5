//! Configuration for market data sources

use crate::error::{MarketError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Desktop Chrome user agent; the news and search pages serve bot-blocking
/// markup to unknown clients
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/102.0.0.0 Safari/537.36";

/// Configuration for market data sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Base URL of Yahoo's fundamentals-timeseries API
    pub fundamentals_base_url: String,

    /// Base URL of the news search page (`<base>/search?q=...`)
    pub news_base_url: String,

    /// Full URL of the DuckDuckGo HTML endpoint
    pub search_url: String,

    /// User agent sent to the scraped pages
    pub user_agent: String,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Maximum web search results per query
    pub max_search_results: usize,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            fundamentals_base_url: "https://query2.finance.yahoo.com".to_string(),
            news_base_url: "https://www.google.com".to_string(),
            search_url: "https://html.duckduckgo.com/html/".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(30),
            max_search_results: 4,
        }
    }
}

impl MarketConfig {
    /// Create a new configuration builder
    pub fn builder() -> MarketConfigBuilder {
        MarketConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("fundamentals_base_url", &self.fundamentals_base_url),
            ("news_base_url", &self.news_base_url),
            ("search_url", &self.search_url),
        ] {
            Url::parse(value)
                .map_err(|e| MarketError::ConfigError(format!("{field} '{value}' is not a URL: {e}")))?;
        }

        if self.request_timeout.is_zero() {
            return Err(MarketError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.max_search_results == 0 {
            return Err(MarketError::ConfigError(
                "max_search_results must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Build an HTTP client with the configured timeout and user agent
    pub fn http_client(&self) -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder()
            .timeout(self.request_timeout)
            .user_agent(&self.user_agent)
            .build()?)
    }
}

/// Builder for MarketConfig
#[derive(Debug, Default)]
pub struct MarketConfigBuilder {
    fundamentals_base_url: Option<String>,
    news_base_url: Option<String>,
    search_url: Option<String>,
    user_agent: Option<String>,
    request_timeout: Option<Duration>,
    max_search_results: Option<usize>,
}

impl MarketConfigBuilder {
    /// Set the Yahoo fundamentals base URL
    pub fn fundamentals_base_url(mut self, url: impl Into<String>) -> Self {
        self.fundamentals_base_url = Some(url.into());
        self
    }

    /// Set the news search base URL
    pub fn news_base_url(mut self, url: impl Into<String>) -> Self {
        self.news_base_url = Some(url.into());
        self
    }

    /// Set the web search URL
    pub fn search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = Some(url.into());
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set maximum web search results
    pub fn max_search_results(mut self, max: usize) -> Self {
        self.max_search_results = Some(max);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<MarketConfig> {
        let defaults = MarketConfig::default();

        let config = MarketConfig {
            fundamentals_base_url: self
                .fundamentals_base_url
                .unwrap_or(defaults.fundamentals_base_url),
            news_base_url: self.news_base_url.unwrap_or(defaults.news_base_url),
            search_url: self.search_url.unwrap_or(defaults.search_url),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            max_search_results: self.max_search_results.unwrap_or(defaults.max_search_results),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MarketConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_search_results, 4);
        assert!(config.user_agent.contains("Chrome/102"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = MarketConfig::builder()
            .news_base_url("http://127.0.0.1:1234")
            .request_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.news_base_url, "http://127.0.0.1:1234");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.search_url, "https://html.duckduckgo.com/html/");
    }

    #[test]
    fn test_validation() {
        assert!(MarketConfig::builder().search_url("not a url").build().is_err());
        assert!(
            MarketConfig::builder()
                .request_timeout(Duration::ZERO)
                .build()
                .is_err()
        );
        assert!(MarketConfig::builder().max_search_results(0).build().is_err());
    }
}
