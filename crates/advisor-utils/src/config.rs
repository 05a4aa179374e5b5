//! Session configuration for the stock advisor
//!
//! Everything the reasoning loop needs for a session, including the model
//! credential, travels in one explicitly passed [`AdvisorConfig`].

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default model served by Groq
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
/// Default Groq API base URL
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field holds a value outside its allowed range
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// An unknown early-stopping policy name
    #[error("Unknown early stopping policy '{0}' (expected 'force' or 'generate')")]
    UnknownEarlyStopping(String),
}

/// What the reasoning loop does once the iteration cap is reached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EarlyStopping {
    /// Stop and return a fixed "could not determine" message
    #[default]
    Force,
    /// Ask the model once more for a final answer from what it has gathered
    Generate,
}

impl FromStr for EarlyStopping {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "force" => Ok(Self::Force),
            "generate" => Ok(Self::Generate),
            other => Err(ConfigError::UnknownEarlyStopping(other.to_string())),
        }
    }
}

impl fmt::Display for EarlyStopping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Force => write!(f, "force"),
            Self::Generate => write!(f, "generate"),
        }
    }
}

/// Configuration for one advisor session
#[derive(Debug, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Model API key; without it the advisor is disabled
    #[serde(skip)]
    pub api_key: Option<SecretString>,

    /// Base URL of the OpenAI-compatible endpoint
    pub api_base: String,

    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Maximum reasoning iterations per question
    pub max_iterations: usize,

    /// Behaviour when the iteration cap is hit
    pub early_stopping: EarlyStopping,

    /// Timeout for model requests
    pub llm_timeout: Duration,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            max_tokens: 1024,
            max_iterations: 15,
            early_stopping: EarlyStopping::Force,
            llm_timeout: Duration::from_secs(120),
        }
    }
}

impl AdvisorConfig {
    /// Create a new configuration builder
    pub fn builder() -> AdvisorConfigBuilder {
        AdvisorConfigBuilder::default()
    }

    /// Whether a usable credential is present
    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_iterations",
                reason: "must be greater than 0".to_string(),
            });
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "temperature",
                reason: format!("{} is outside 0.0..=2.0", self.temperature),
            });
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_tokens",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for AdvisorConfig
#[derive(Debug, Default)]
pub struct AdvisorConfigBuilder {
    api_key: Option<SecretString>,
    api_base: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<usize>,
    max_iterations: Option<usize>,
    early_stopping: Option<EarlyStopping>,
    llm_timeout: Option<Duration>,
}

impl AdvisorConfigBuilder {
    /// Fill unset fields from `GROQ_API_KEY`, `GROQ_API_BASE` and `GROQ_MODEL`
    pub fn from_env(mut self) -> Self {
        if self.api_key.is_none() {
            self.api_key = std::env::var("GROQ_API_KEY").ok().map(SecretString::from);
        }
        if self.api_base.is_none() {
            self.api_base = std::env::var("GROQ_API_BASE").ok();
        }
        if self.model.is_none() {
            self.model = std::env::var("GROQ_MODEL").ok();
        }
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Set the API base URL
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens per completion
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set maximum reasoning iterations
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = Some(max);
        self
    }

    /// Set the early stopping policy
    pub fn early_stopping(mut self, policy: EarlyStopping) -> Self {
        self.early_stopping = Some(policy);
        self
    }

    /// Set the model request timeout
    pub fn llm_timeout(mut self, timeout: Duration) -> Self {
        self.llm_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AdvisorConfig, ConfigError> {
        let defaults = AdvisorConfig::default();

        let config = AdvisorConfig {
            api_key: self.api_key,
            api_base: self.api_base.unwrap_or(defaults.api_base),
            model: self.model.unwrap_or(defaults.model),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            early_stopping: self.early_stopping.unwrap_or(defaults.early_stopping),
            llm_timeout: self.llm_timeout.unwrap_or(defaults.llm_timeout),
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
        let config = AdvisorConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_iterations, 15);
        assert_eq!(config.early_stopping, EarlyStopping::Force);
        assert!(!config.has_credential());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = AdvisorConfig::builder()
            .api_key("gsk-test")
            .model("mixtral-8x7b-32768")
            .max_iterations(4)
            .early_stopping(EarlyStopping::Generate)
            .build()
            .unwrap();

        assert!(config.has_credential());
        assert_eq!(config.model, "mixtral-8x7b-32768");
        assert_eq!(config.max_iterations, 4);
        assert_eq!(config.early_stopping, EarlyStopping::Generate);
    }

    #[test]
    fn test_blank_key_is_not_a_credential() {
        let config = AdvisorConfig::builder().api_key("   ").build().unwrap();
        assert!(!config.has_credential());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let result = AdvisorConfig::builder().max_iterations(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "max_iterations",
                ..
            })
        ));
    }

    #[test]
    fn test_temperature_range() {
        assert!(AdvisorConfig::builder().temperature(2.5).build().is_err());
        assert!(AdvisorConfig::builder().temperature(0.7).build().is_ok());
    }

    #[test]
    fn test_early_stopping_parse() {
        assert_eq!("force".parse::<EarlyStopping>().unwrap(), EarlyStopping::Force);
        assert_eq!(
            " Generate ".parse::<EarlyStopping>().unwrap(),
            EarlyStopping::Generate
        );
        assert!("later".parse::<EarlyStopping>().is_err());
        assert_eq!(EarlyStopping::Generate.to_string(), "generate");
    }

    #[test]
    fn test_secret_not_serialized() {
        let config = AdvisorConfig::builder().api_key("gsk-secret").build().unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("gsk-secret"));
        assert!(json.contains("\"early_stopping\":\"force\""));
    }
}
