//! Connection settings for the backend task API.

use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the backend base URL.
pub const API_URL_VAR: &str = "SPRINTBOARD_API_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const API_TIMEOUT_VAR: &str = "SPRINTBOARD_API_TIMEOUT_SECS";
/// Environment variable carrying the bearer token.
pub const API_TOKEN_VAR: &str = "SPRINTBOARD_API_TOKEN";

/// Configuration for [`super::HttpTaskService`].
///
/// # Examples
///
/// ```
/// use sprintboard::board::adapters::http::HttpTaskServiceConfig;
///
/// let config = HttpTaskServiceConfig::new("https://api.example.com/")
///     .with_bearer_token("secret");
/// assert_eq!(config.base_url, "https://api.example.com");
/// assert_eq!(config.bearer_token.as_deref(), Some("secret"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTaskServiceConfig {
    /// Backend base URL without a trailing slash.
    pub base_url: String,
    /// Per-request timeout enforced by the transport.
    pub timeout: Duration,
    /// Token sent as `Authorization: Bearer`, if any.
    pub bearer_token: Option<String>,
}

impl HttpTaskServiceConfig {
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    /// Creates a configuration with the default timeout and no token.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let raw: String = base_url.into();
        Self {
            base_url: raw.trim().trim_end_matches('/').to_owned(),
            timeout: Self::DEFAULT_TIMEOUT,
            bearer_token: None,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the bearer token. Blank tokens are ignored.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        let raw: String = token.into();
        self.bearer_token = (!raw.trim().is_empty()).then_some(raw);
        self
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`HttpConfigError`] when the base URL is missing or the
    /// timeout is not a whole number of seconds.
    pub fn from_env() -> Result<Self, HttpConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`HttpConfigError`] when the base URL is missing or the
    /// timeout is not a whole number of seconds.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, HttpConfigError> {
        let base_url = lookup(API_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(HttpConfigError::MissingBaseUrl)?;
        let mut config = Self::new(base_url);

        if let Some(raw) = lookup(API_TIMEOUT_VAR) {
            let seconds: u64 = raw
                .trim()
                .parse()
                .map_err(|_| HttpConfigError::InvalidTimeout(raw.clone()))?;
            config = config.with_timeout(Duration::from_secs(seconds));
        }
        if let Some(token) = lookup(API_TOKEN_VAR) {
            config = config.with_bearer_token(token);
        }
        Ok(config)
    }
}

/// Errors raised while reading [`HttpTaskServiceConfig`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpConfigError {
    /// No base URL was provided.
    #[error("{API_URL_VAR} must be set to the backend base URL")]
    MissingBaseUrl,
    /// The timeout is not a whole number of seconds.
    #[error("invalid {API_TIMEOUT_VAR} value '{0}', expected whole seconds")]
    InvalidTimeout(String),
}
