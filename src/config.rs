//! Client configuration.
//!
//! Everything the store and the HTTP adapter need is carried explicitly in a
//! [`ClientConfig`]. The display [`Language`] lives here as well so the
//! presentation layer receives it as a value instead of reading global state.

use std::env;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://uat.onebanc.ai/emulator/interview";
pub const ENV_BASE_URL: &str = "DISHCART_BASE_URL";
pub const ENV_API_KEY: &str = "DISHCART_API_KEY";

/// Display language for the presentation layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Hindi,
}

impl Language {
    /// The other language. The presentation owns the current value and
    /// replaces it with this on a toggle.
    pub fn toggled(self) -> Language {
        match self {
            Language::English => Language::Hindi,
            Language::Hindi => Language::English,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => f.write_str("English"),
            Language::Hindi => f.write_str("Hindi"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    /// Page requested by `load_catalog`.
    pub page: u32,
    /// Items per page requested by `load_catalog`.
    pub page_size: u32,
    pub timeout_ms: u64,
    pub language: Language,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            page: 1,
            page_size: 10,
            timeout_ms: 10_000,
            language: Language::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "invalid client config: {}", err),
            ConfigError::Invalid(field) => {
                write!(f, "invalid client config: {} is out of range", field)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..ClientConfig::default()
        }
    }

    /// Parse a JSON config. Missing fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `DISHCART_BASE_URL` / `DISHCART_API_KEY` when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base_url) = env::var(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Ok(api_key) = env::var(ENV_API_KEY) {
            self.api_key = api_key;
        }
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page == 0 {
            return Err(ConfigError::Invalid("page"));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size"));
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
