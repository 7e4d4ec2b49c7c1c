//! Application configuration: scoring constants, throttle spacing, and
//! the remote reranker endpoint. Loaded from an optional TOML file with
//! environment-variable overrides on top of built-in defaults.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

use crate::nudges::{ScoringConfig, ThrottleConfig};

pub const ENV_RERANKER_ENDPOINT: &str = "CARTWISE_RERANKER_ENDPOINT";
pub const ENV_RERANKER_API_KEY: &str = "CARTWISE_RERANKER_API_KEY";
pub const ENV_RERANKER_ENABLED: &str = "CARTWISE_RERANKER_ENABLED";
pub const ENV_SCAN_SPACING: &str = "CARTWISE_SCAN_SPACING";
pub const ENV_LOG_LEVEL: &str = "CARTWISE_LOG";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub scoring: ScoringConfig,
    pub throttle: ThrottleConfig,
    pub reranker: RerankerConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct RerankerConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub api_key: Option<SecretString>,
    pub timeout_secs: u64,
}

impl RerankerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            throttle: ThrottleConfig::default(),
            reranker: RerankerConfig {
                enabled: false,
                endpoint: "http://localhost:8787/rerank".to_owned(),
                api_key: None,
                timeout_secs: 5,
            },
            logging: LoggingConfig { level: "info".to_owned() },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    scoring: ScoringConfig,
    throttle: ThrottleConfig,
    reranker: RawRerankerConfig,
    logging: RawLoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawRerankerConfig {
    enabled: Option<bool>,
    endpoint: Option<String>,
    api_key: Option<String>,
    timeout_secs: Option<u64>,
}

impl Default for RawRerankerConfig {
    fn default() -> Self {
        Self { enabled: None, endpoint: None, api_key: None, timeout_secs: None }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLoggingConfig {
    level: Option<String>,
}

impl AppConfig {
    /// Defaults, then the TOML file (when given), then env overrides.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self, ConfigError> {
        let mut config = AppConfig::default();

        if let Some(path) = config_path {
            let contents = fs::read_to_string(path)
                .map_err(|source| ConfigError::ReadFile { path: path.clone(), source })?;
            let raw: RawConfig = toml::from_str(&contents)
                .map_err(|source| ConfigError::ParseFile { path: path.clone(), source })?;
            config.apply_raw(raw);
        }

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_raw(&mut self, raw: RawConfig) {
        self.scoring = raw.scoring;
        self.throttle = raw.throttle;
        if let Some(enabled) = raw.reranker.enabled {
            self.reranker.enabled = enabled;
        }
        if let Some(endpoint) = raw.reranker.endpoint {
            self.reranker.endpoint = endpoint;
        }
        if let Some(api_key) = raw.reranker.api_key {
            self.reranker.api_key = Some(api_key.into());
        }
        if let Some(timeout_secs) = raw.reranker.timeout_secs {
            self.reranker.timeout_secs = timeout_secs;
        }
        if let Some(level) = raw.logging.level {
            self.logging.level = level;
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(endpoint) = env::var(ENV_RERANKER_ENDPOINT) {
            self.reranker.endpoint = endpoint;
        }
        if let Ok(api_key) = env::var(ENV_RERANKER_API_KEY) {
            if !api_key.is_empty() {
                self.reranker.api_key = Some(api_key.into());
            }
        }
        if let Ok(enabled) = env::var(ENV_RERANKER_ENABLED) {
            self.reranker.enabled = match enabled.as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(ConfigError::InvalidEnvOverride {
                        key: ENV_RERANKER_ENABLED.to_owned(),
                        value: other.to_owned(),
                    })
                }
            };
        }
        if let Ok(spacing) = env::var(ENV_SCAN_SPACING) {
            self.throttle.scan_spacing =
                spacing.parse().map_err(|_| ConfigError::InvalidEnvOverride {
                    key: ENV_SCAN_SPACING.to_owned(),
                    value: spacing,
                })?;
        }
        if let Ok(level) = env::var(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.throttle.scan_spacing == 0 {
            return Err(ConfigError::Validation("throttle.scan_spacing must be >= 1".to_owned()));
        }
        if self.reranker.enabled && self.reranker.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "reranker.timeout_secs must be >= 1 when the reranker is enabled".to_owned(),
            ));
        }
        if self.scoring.same_type_penalty < 0.0 {
            return Err(ConfigError::Validation(
                "scoring.same_type_penalty must not be negative".to_owned(),
            ));
        }
        if self.scoring.savings_multiplier < 0.0 {
            return Err(ConfigError::Validation(
                "scoring.savings_multiplier must not be negative".to_owned(),
            ));
        }
        Ok(())
    }
}
