//! Advisor configuration from the environment
//!
//! Environment variables:
//! - OPENAI_API_KEY: bearer token (optional; calls fail with `MissingApiKey` without it)
//! - OPENAI_BASE_URL: API root (default: https://api.openai.com/v1)
//! - ADVISOR_MODEL: chat model name (default: gpt-4o-mini)
//! - ADVISOR_TIMEOUT_SECS: per-request timeout (default: 60)

use std::time::Duration;

use shared::{ProcessId, process_warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AdvisorConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let timeout = match get("ADVISOR_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(seconds) if seconds > 0 => Duration::from_secs(seconds),
                _ => {
                    process_warn!(
                        ProcessId::current(),
                        "⚠️ Ignoring invalid ADVISOR_TIMEOUT_SECS '{}', using {}s",
                        raw,
                        DEFAULT_TIMEOUT_SECS
                    );
                    defaults.timeout
                }
            },
            None => defaults.timeout,
        };

        Self {
            api_key: get("OPENAI_API_KEY"),
            base_url: get("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            model: get("ADVISOR_MODEL").unwrap_or(defaults.model),
            timeout,
        }
    }

    /// Config pointing at a specific endpoint, for tests and self-hosted gateways
    pub fn with_endpoint(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AdvisorConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AdvisorConfig::default());
        assert_eq!(config.completions_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_overrides() {
        let config = AdvisorConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", " sk-test "),
            ("OPENAI_BASE_URL", "http://localhost:9000/v1/"),
            ("ADVISOR_MODEL", "gpt-4o"),
            ("ADVISOR_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.completions_url(), "http://localhost:9000/v1/chat/completions");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_blank_key_is_unset_and_bad_timeout_falls_back() {
        let config = AdvisorConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "   "),
            ("ADVISOR_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(config.api_key, None);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
