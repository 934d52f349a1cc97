//! Relay configuration.
//!
//! The configuration is read once at startup, validated, and then shared
//! read-only. Nothing in the relay reads the environment after this point.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::composer::DEFAULT_SYSTEM_PROMPT;

/// Default OpenRouter chat completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-20b:free";

/// Default display title sent as `X-Title`.
pub const DEFAULT_TITLE: &str = "Chat Relay";

/// Default outbound request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Upper bound for the configurable timeout, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Number of key characters shown by [`ApiKey::redacted`].
const REDACTED_PREFIX_CHARS: usize = 8;

/// Environment variable names.
pub mod env {
    pub const API_KEY: &str = "OPENROUTER_API_KEY";
    pub const MODEL: &str = "OPENROUTER_MODEL";
    pub const ENDPOINT: &str = "OPENROUTER_URL";
    pub const TITLE: &str = "APP_TITLE";
    pub const ORIGIN: &str = "ORIGIN";
    pub const TEMPERATURE: &str = "RELAY_TEMPERATURE";
    pub const MAX_TOKENS: &str = "RELAY_MAX_TOKENS";
    pub const TIMEOUT_SECS: &str = "RELAY_TIMEOUT_SECS";
    pub const SYSTEM_PROMPT: &str = "RELAY_SYSTEM_PROMPT";
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("OPENROUTER_API_KEY is not set")]
    MissingApiKey,

    #[error("API key must not contain whitespace")]
    MalformedApiKey,

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{name} is not a valid http(s) URL: {value}")]
    InvalidUrl { name: &'static str, value: String },

    #[error("ORIGIN must be a bare scheme://host[:port] with no path or query, got {0}")]
    InvalidOrigin(String),

    #[error("RELAY_TEMPERATURE must be a number between 0.0 and 2.0, got {0}")]
    InvalidTemperature(String),

    #[error("RELAY_MAX_TOKENS must be a positive integer, got {0}")]
    InvalidMaxTokens(String),

    #[error("RELAY_TIMEOUT_SECS must be between 1 and 300, got {0}")]
    InvalidTimeout(String),
}

/// Provider secret key.
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The full secret, for the outbound `Authorization` header only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First 8 characters followed by `...`, or an empty string for an empty key.
    #[must_use]
    pub fn redacted(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let prefix: String = self.0.chars().take(REDACTED_PREFIX_CHARS).collect();
        format!("{prefix}...")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.redacted())
    }
}

/// Immutable relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Provider secret key.
    pub api_key: ApiKey,
    /// Model identifier sent with every request.
    pub model: String,
    /// Completion endpoint URL.
    pub endpoint: String,
    /// Display title, sent upstream as `X-Title` and shown on `GET /`.
    pub title: String,
    /// Allowed browser origin; also sent upstream as `HTTP-Referer`.
    /// `None` or `*` allows any origin.
    pub origin: Option<String>,
    /// Sampling temperature, if any.
    pub temperature: Option<f32>,
    /// Maximum output tokens, if any.
    pub max_tokens: Option<u32>,
    /// Outbound request timeout.
    pub timeout: Duration,
    /// System turn injected when the client supplies none.
    pub system_prompt: String,
}

impl RelayConfig {
    /// Create a configuration with defaults for everything except the key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: ApiKey::new(api_key),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            title: DEFAULT_TITLE.to_string(),
            origin: None,
            temperature: None,
            max_tokens: None,
            timeout: DEFAULT_TIMEOUT,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Load from the process environment and validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup and validate.
    ///
    /// Empty or whitespace-only values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(env::API_KEY).ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key);

        if let Some(model) = get(env::MODEL) {
            config.model = model;
        }
        if let Some(endpoint) = get(env::ENDPOINT) {
            config.endpoint = endpoint;
        }
        if let Some(title) = get(env::TITLE) {
            config.title = title;
        }
        if let Some(prompt) = get(env::SYSTEM_PROMPT) {
            config.system_prompt = prompt;
        }
        config.origin = get(env::ORIGIN);

        if let Some(raw) = get(env::TEMPERATURE) {
            let value = raw
                .parse::<f32>()
                .map_err(|_| ConfigError::InvalidTemperature(raw.clone()))?;
            config.temperature = Some(value);
        }
        if let Some(raw) = get(env::MAX_TOKENS) {
            let value = raw
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidMaxTokens(raw.clone()))?;
            config.max_tokens = Some(value);
        }
        if let Some(raw) = get(env::TIMEOUT_SECS) {
            let secs = raw
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the completion endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the allowed origin.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set the outbound timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the generation parameters.
    #[must_use]
    pub const fn with_generation(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// `true` when any browser origin may call the relay.
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.origin.as_deref().is_none_or(|o| o == "*")
    }

    /// Check every field for presence and shape.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let key = self.api_key.expose();
        if key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if key.chars().any(char::is_whitespace) {
            return Err(ConfigError::MalformedApiKey);
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::Empty(env::MODEL));
        }
        if self.title.trim().is_empty() {
            return Err(ConfigError::Empty(env::TITLE));
        }
        if self.system_prompt.trim().is_empty() {
            return Err(ConfigError::Empty(env::SYSTEM_PROMPT));
        }

        check_http_url(env::ENDPOINT, &self.endpoint)?;
        if let Some(origin) = self.origin.as_deref() {
            if origin != "*" {
                check_origin(origin)?;
            }
        }

        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ConfigError::InvalidTemperature(temperature.to_string()));
            }
        }
        if self.max_tokens == Some(0) {
            return Err(ConfigError::InvalidMaxTokens("0".to_string()));
        }

        let secs = self.timeout.as_secs();
        if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
            return Err(ConfigError::InvalidTimeout(secs.to_string()));
        }

        Ok(())
    }
}

fn check_http_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
        }),
    }
}

/// Browsers send `Origin` as `scheme://host[:port]`; anything longer never matches.
fn check_origin(value: &str) -> Result<(), ConfigError> {
    check_http_url(env::ORIGIN, value)?;
    let url = Url::parse(value).map_err(|_| ConfigError::InvalidOrigin(value.to_string()))?;
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidOrigin(value.to_string()));
    }
    Ok(())
}
