use std::env;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com/api/v3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("FMP api key not set (FMP_API_KEY)")]
    MissingApiKey,
    #[error("invalid FMP_BASE_URL: {0}")]
    InvalidBaseUrl(String),
}

/// Runtime settings for a report run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub output_dir: PathBuf,
}

impl AppConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from("."),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = base_url.into();
        let trimmed = raw.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(raw));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Read settings from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = read_env_var("FMP_API_KEY").ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key)?;

        if let Some(base_url) = read_env_var("FMP_BASE_URL") {
            config = config.with_base_url(base_url)?;
        }
        if let Some(dir) = read_env_var("EARNINGS_REPORT_DIR") {
            config = config.with_output_dir(dir);
        }

        Ok(config)
    }
}

fn read_env_var(key: &str) -> Option<String> {
    let raw = env::var(key).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}
