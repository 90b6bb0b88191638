//! Configuration management for cmdgen.
//!
//! Configuration can be set via environment variables:
//! - `OPENAI_API_KEY` - Credential for the completion API. May be unset at
//!   startup; requests then fail with a configuration error.
//! - `BASE_URL` - Optional. Completion API base URL. Defaults to `https://api.openai.com/v1`.
//! - `OPENROUTER_MODEL_ID` - Optional. Model identifier. Defaults to `gpt-4-turbo`.
//! - `HOST` - Optional. Server host. Defaults to `0.0.0.0`.
//! - `PORT` - Optional. Server port. Falls back to `3000` when unset or not a valid port.

use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4-turbo";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Completion API key (`None` when unset or empty)
    pub api_key: Option<String>,

    /// Completion API base URL, without trailing slash
    pub base_url: String,

    /// Model identifier sent with every completion request
    pub model: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `BASE_URL` is not an absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY").filter(|v| !v.trim().is_empty());

        let base_url = match lookup("BASE_URL").filter(|v| !v.trim().is_empty()) {
            Some(raw) => {
                Url::parse(raw.trim())
                    .map_err(|e| ConfigError::InvalidValue("BASE_URL".to_string(), e.to_string()))?;
                raw.trim().trim_end_matches('/').to_string()
            }
            None => DEFAULT_BASE_URL.to_string(),
        };

        let model = lookup("OPENROUTER_MODEL_ID")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        // Non-numeric and zero ports fall back rather than fail.
        let port = lookup("PORT")
            .and_then(|v| v.trim().parse::<u16>().ok())
            .filter(|p| *p != 0)
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            api_key,
            base_url,
            model,
            host,
            port,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: Option<String>, base_url: String, model: String) -> Self {
        Self {
            api_key,
            base_url,
            model,
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, "gpt-4-turbo");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("BASE_URL", "https://openrouter.ai/api/v1/"),
            ("OPENROUTER_MODEL_ID", "meta-llama/llama-3-70b"),
            ("PORT", "8080"),
        ])
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.model, "meta-llama/llama-3-70b");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn port_falls_back_on_garbage() {
        assert_eq!(load(&[("PORT", "not-a-port")]).unwrap().port, 3000);
        assert_eq!(load(&[("PORT", "0")]).unwrap().port, 3000);
        assert_eq!(load(&[("PORT", "70000")]).unwrap().port, 3000);
    }

    #[test]
    fn empty_api_key_is_unset() {
        assert!(load(&[("OPENAI_API_KEY", "  ")]).unwrap().api_key.is_none());
    }

    #[test]
    fn rejects_relative_base_url() {
        let err = load(&[("BASE_URL", "not a url")]).unwrap_err();
        assert!(err.to_string().contains("BASE_URL"));
    }
}
