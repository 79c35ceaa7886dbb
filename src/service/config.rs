//! Text service configuration.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::model::Language;

/// Text the service decodes in place of copy that could not be retrieved.
pub const DEFAULT_ERROR_SENTINEL: &str = "error";

/// Path appended to the base URL when none is configured.
pub const DEFAULT_ENDPOINT: &str = "text";

/// Configuration for retrieving copy from a remote text service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL of the text service (e.g., "https://api.example.com")
    pub base_url: String,

    /// Endpoint path below the base URL
    pub endpoint: String,

    /// Request timeout
    pub timeout: Duration,

    /// Text decoded when retrieval fails
    pub error_sentinel: String,

    /// Language used when the caller does not name one
    pub default_language: Language,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl ServiceConfig {
    /// Create a configuration for the given base URL with defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the endpoint path.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the error sentinel.
    pub fn with_error_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.error_sentinel = sentinel.into();
        self
    }

    /// Set the default language.
    pub fn with_default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Full endpoint URL without query parameters.
    pub fn endpoint_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let endpoint = self.endpoint.trim_matches('/');
        if endpoint.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, endpoint)
        }
    }

    /// Check the configuration for values a client cannot work with.
    pub fn validate(&self) -> Result<()> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(Error::Config("base URL is not set".into()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::InvalidUrl(format!(
                "{} (expected an http or https URL)",
                base
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".into()));
        }
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(10),
            error_sentinel: DEFAULT_ERROR_SENTINEL.to_string(),
            default_language: Language::default(),
            user_agent: concat!("copydeck/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
