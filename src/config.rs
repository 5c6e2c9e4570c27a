use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5001/predict";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONFIG_FILE: &str = "cardsentry.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read {CONFIG_FILE}: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse {CONFIG_FILE}: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("environment variable {0} is not valid: {1}")]
    Env(&'static str, String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration in ascending priority: built-in defaults, an
    /// optional `cardsentry.yaml` next to the binary, then
    /// `CARDSENTRY_ENDPOINT` / `CARDSENTRY_TIMEOUT_SECS` from the
    /// environment (a `.env` file is honored too).
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = if Path::new(CONFIG_FILE).exists() {
            let raw = std::fs::read_to_string(CONFIG_FILE)?;
            serde_yaml::from_str(&raw)?
        } else {
            Self::default()
        };

        if let Ok(endpoint) = std::env::var("CARDSENTRY_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(timeout) = std::env::var("CARDSENTRY_TIMEOUT_SECS") {
            config.timeout_secs = timeout
                .parse()
                .map_err(|_| ConfigError::Env("CARDSENTRY_TIMEOUT_SECS", timeout))?;
        }
        Ok(config)
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
