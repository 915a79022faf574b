//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::path::PathBuf;

/// Default Gemini model used for chat completions
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default base URL for the Gemini API
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote assistant configuration
    pub gemini: GeminiConfig,
    /// Path of the durable credential store file
    pub credential_store_path: PathBuf,
    /// Work-submission relay configuration
    pub relay: RelayConfig,
}

/// Remote assistant (Gemini) configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key baked in at deployment time, lowest-priority credential source
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// API base URL
    pub api_base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Work-submission relay configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Endpoint the relay POST goes to
    pub endpoint: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            gemini: GeminiConfig {
                api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
                model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                api_base_url: env::var("GEMINI_API_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
                timeout_secs: env::var("GEMINI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(30),
            },
            credential_store_path: env::var_os("CREDENTIAL_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(Self::default_store_path),
            relay: RelayConfig {
                endpoint: env::var("SUBMISSION_RELAY_URL")
                    .unwrap_or_else(|_| "https://formspree.io/f/mnnkpdbo".to_string()),
            },
        }
    }

    /// Default path of the credential store file
    ///
    /// `~/.creators-hub/credential.json`, or a file in the current directory
    /// when no home directory is available.
    fn default_store_path() -> PathBuf {
        if let Some(home) = env::var_os("HOME") {
            let mut path = PathBuf::from(home);
            path.push(".creators-hub");
            path.push("credential.json");
            path
        } else {
            PathBuf::from("credential.json")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn from_env_uses_defaults_when_unset() {
        env::remove_var("GEMINI_API_KEY");
        env::remove_var("GEMINI_MODEL");
        env::remove_var("GEMINI_API_BASE_URL");
        env::remove_var("GEMINI_TIMEOUT_SECS");
        env::remove_var("CREDENTIAL_STORE_PATH");
        env::remove_var("SUBMISSION_RELAY_URL");

        let config = Config::from_env();
        assert_eq!(config.gemini.api_key, None);
        assert_eq!(config.gemini.model, DEFAULT_MODEL);
        assert_eq!(config.gemini.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.gemini.timeout_secs, 30);
        assert!(config.relay.endpoint.starts_with("https://formspree.io/"));
    }

    #[test]
    #[serial]
    fn from_env_reads_overrides() {
        env::set_var("GEMINI_API_KEY", "deploy-key-123");
        env::set_var("GEMINI_MODEL", "gemini-2.5-pro");
        env::set_var("GEMINI_TIMEOUT_SECS", "5");
        env::set_var("CREDENTIAL_STORE_PATH", "/tmp/cred.json");

        let config = Config::from_env();
        assert_eq!(config.gemini.api_key.as_deref(), Some("deploy-key-123"));
        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert_eq!(config.gemini.timeout_secs, 5);
        assert_eq!(config.credential_store_path, PathBuf::from("/tmp/cred.json"));

        env::remove_var("GEMINI_API_KEY");
        env::remove_var("GEMINI_MODEL");
        env::remove_var("GEMINI_TIMEOUT_SECS");
        env::remove_var("CREDENTIAL_STORE_PATH");
    }

    #[test]
    #[serial]
    fn empty_deploy_key_is_treated_as_absent() {
        env::set_var("GEMINI_API_KEY", "");
        let config = Config::from_env();
        assert_eq!(config.gemini.api_key, None);
        env::remove_var("GEMINI_API_KEY");
    }
}
