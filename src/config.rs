use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://router.huggingface.co/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "Qwen/Qwen2.5-Coder-32B-Instruct";
pub const TOKEN_ENV: &str = "HUGGINGFACE_API_TOKEN";

/// Main configuration structure for llm-qa
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub web: WebConfig,
}

/// Settings for the chat-completion endpoint
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Bearer credential. Normally comes from `HUGGINGFACE_API_TOKEN`.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            token: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 250,
            temperature: 0.7,
            timeout_seconds: 30,
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
        }
    }
}

// Keep the token out of logs
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl ApiConfig {
    /// The credential with surrounding whitespace removed, if any is left
    pub fn credential(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// Load configuration from file with environment variable overrides
    /// ALWAYS returns a valid config - never fails
    pub fn load() -> Self {
        let env_paths = ["../.env", ".env"];

        let mut env_loaded = false;
        for path in &env_paths {
            if dotenvy::from_path(path).is_ok() {
                tracing::info!("Loaded .env from: {}", path);
                env_loaded = true;
                break;
            }
        }

        if !env_loaded {
            tracing::debug!("No .env file found - continuing with env vars only");
        }

        let config_path =
            env::var("LLM_QA_CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match Self::from_yaml_str(&contents) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from {}", config_path);
                        config
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to parse config file {}: {} - using defaults",
                            config_path,
                            e
                        );
                        Self::default()
                    }
                },
                Err(e) => {
                    tracing::error!(
                        "Failed to read config file {}: {} - using defaults",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            tracing::debug!("Config file not found at {} - using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();

        // Validate configuration - log warnings but don't fail
        if let Err(e) = config.validate() {
            tracing::warn!("Config validation warnings: {} - continuing anyway", e);
        }

        config
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup(TOKEN_ENV) {
            self.api.token = Some(token);
        }
        if let Some(endpoint) = lookup("LLM_QA_ENDPOINT") {
            self.api.endpoint = endpoint;
        }
        if let Some(model) = lookup("LLM_QA_MODEL") {
            self.api.model = model;
        }
        if let Some(max_tokens) = lookup("LLM_QA_MAX_TOKENS") {
            match max_tokens.parse() {
                Ok(v) => self.api.max_tokens = v,
                Err(_) => tracing::warn!("Ignoring invalid LLM_QA_MAX_TOKENS: {}", max_tokens),
            }
        }
        if let Some(temperature) = lookup("LLM_QA_TEMPERATURE") {
            match temperature.parse() {
                Ok(v) => self.api.temperature = v,
                Err(_) => tracing::warn!("Ignoring invalid LLM_QA_TEMPERATURE: {}", temperature),
            }
        }
        if let Some(timeout) = lookup("LLM_QA_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(v) => self.api.timeout_seconds = v,
                Err(_) => tracing::warn!("Ignoring invalid LLM_QA_TIMEOUT_SECS: {}", timeout),
            }
        }

        if let Some(bind) = lookup("LLM_QA_WEB_BIND") {
            self.web.bind = bind;
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.api.credential().is_none() {
            return Err(format!("{TOKEN_ENV} environment variable must be set").into());
        }
        if self.api.timeout_seconds == 0 {
            return Err("api.timeout_seconds cannot be 0".into());
        }
        if self.api.max_tokens == 0 {
            return Err("api.max_tokens cannot be 0".into());
        }
        if !(0.0..=2.0).contains(&self.api.temperature) {
            return Err("api.temperature must be between 0.0 and 2.0".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_remote_contract() {
        let cfg = Config::default();
        assert_eq!(cfg.api.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.api.max_tokens, 250);
        assert!((cfg.api.temperature - 0.7).abs() < 1e-6);
        assert_eq!(cfg.api.timeout(), Duration::from_secs(30));
        assert!(cfg.api.token.is_none());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut cfg = Config::default();
        cfg.apply_overrides(lookup_from(&[
            (TOKEN_ENV, "hf_secret"),
            ("LLM_QA_MODEL", "Qwen/Qwen2.5-7B-Instruct"),
            ("LLM_QA_TIMEOUT_SECS", "5"),
            ("LLM_QA_WEB_BIND", "127.0.0.1:8080"),
        ]));
        assert_eq!(cfg.api.credential(), Some("hf_secret"));
        assert_eq!(cfg.api.model, "Qwen/Qwen2.5-7B-Instruct");
        assert_eq!(cfg.api.timeout_seconds, 5);
        assert_eq!(cfg.web.bind, "127.0.0.1:8080");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_invalid_numeric_override_is_ignored() {
        let mut cfg = Config::default();
        cfg.apply_overrides(lookup_from(&[
            ("LLM_QA_MAX_TOKENS", "lots"),
            ("LLM_QA_TEMPERATURE", "warm"),
        ]));
        assert_eq!(cfg.api.max_tokens, 250);
        assert!((cfg.api.temperature - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_blank_token_is_no_credential() {
        let mut cfg = Config::default();
        cfg.api.token = Some("   ".to_string());
        assert_eq!(cfg.api.credential(), None);

        cfg.api.token = Some("  hf_abc \n".to_string());
        assert_eq!(cfg.api.credential(), Some("hf_abc"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let cfg = Config::from_yaml_str("api:\n  model: some/model\n").unwrap();
        assert_eq!(cfg.api.model, "some/model");
        assert_eq!(cfg.api.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.web.bind, "0.0.0.0:5000");
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut cfg = Config::default();
        cfg.api.token = Some("hf_secret".to_string());
        let printed = format!("{cfg:?}");
        assert!(!printed.contains("hf_secret"));
        assert!(printed.contains("<redacted>"));
    }
}
