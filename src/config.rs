//! Configuration for pubsearch.
//!
//! There is no config file: the only external setting is the API credential,
//! read from `GEMINI_API_KEY`. Model, temperature and endpoint are fixed
//! defaults carried in [`Config`] so callers and tests can pass them explicitly.

use crate::error::{QueryError, API_KEY_VAR};

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_TEMPERATURE: f32 = 0.2;
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Resolved settings for a single invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// API credential for the generation service.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature (kept low for near-deterministic output).
    pub temperature: f32,
    /// Base URL of the generation service.
    pub base_url: String,
}

impl Config {
    /// Build a config with default settings around a credential.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Load configuration through a variable lookup, usually `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, QueryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .map(Self::with_api_key)
            .ok_or(QueryError::MissingCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::with_api_key("secret");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert!((config.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
    }

    #[test]
    fn test_lookup_reads_api_key() {
        let config = Config::from_lookup(|key| {
            (key == "GEMINI_API_KEY").then(|| "abc123".to_string())
        })
        .unwrap();
        assert_eq!(config.api_key, "abc123");
    }

    #[test]
    fn test_missing_key() {
        let err = Config::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, QueryError::MissingCredential));
    }

    #[test]
    fn test_blank_key_is_missing() {
        let err = Config::from_lookup(|_| Some("   ".to_string())).unwrap_err();
        assert!(matches!(err, QueryError::MissingCredential));
    }
}
