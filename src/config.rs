//! Per-provider connection settings.
//!
//! [`ProviderConfig`] is a plain value object; where the values come from
//! (settings UI, profile files, environment) is the caller's concern.

use crate::error::ChatError;

/// Immutable connection settings for one provider.
///
/// # Examples
///
/// ```
/// use fae_chat::ProviderConfig;
///
/// let config = ProviderConfig::new("http://localhost:11434", "llama3:8b");
/// assert!(config.validate().is_ok());
///
/// let cloud = ProviderConfig::new("https://api.openai.com/v1", "gpt-4o-mini")
///     .with_api_key("sk-…");
/// assert!(cloud.api_key.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Base URL of the provider API. Trailing slashes are tolerated.
    pub base_url: String,
    /// API key for bearer auth. `None` for providers that need none.
    pub api_key: Option<String>,
    /// Model used when the caller does not name one.
    pub default_model: String,
}

impl ProviderConfig {
    /// Create a config with a base URL and default model, no API key.
    pub fn new(base_url: impl Into<String>, default_model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            default_model: default_model.into(),
        }
    }

    /// Attach an API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Returns the base URL without any trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Validates this configuration.
    ///
    /// Checks:
    /// - `base_url` must be non-empty and parse as an absolute http(s) URL
    /// - `default_model` must be non-empty
    pub fn validate(&self) -> Result<(), ChatError> {
        if self.base_url.trim().is_empty() {
            return Err(ChatError::Config("base_url is empty".into()));
        }
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| ChatError::Config(format!("base_url is not a valid URL: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ChatError::Config(format!(
                "base_url must be http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if self.default_model.trim().is_empty() {
            return Err(ChatError::Config("default_model is empty".into()));
        }
        Ok(())
    }
}
