//! Process-wide client configuration.
//!
//! Values come from a TOML file, the environment, or both. File values win,
//! environment variables fill the gaps, and defaults cover the rest. The
//! resulting [`ClientConfig`] is read once when the client is built and never
//! changes afterwards.

use std::{fs, path::Path, time::Duration};

use secrecy::SecretString;
use serde::Deserialize;
use shared_utils::env::{get_env_var, get_optional_env_var, parse_optional_env_var};
use tracing::debug;

use crate::errors::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const API_KEY_VAR: &str = "ALPHAVANTAGE_API_KEY";
pub const BASE_URL_VAR: &str = "ALPHAVANTAGE_BASE_URL";
pub const TIMEOUT_VAR: &str = "ALPHAVANTAGE_TIMEOUT_SECS";

/// On-disk shape of the config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug)]
pub struct ClientConfig {
    /// Provider root, without the `/query` endpoint.
    pub base_url: String,
    /// Static access key sent as `apikey`.
    pub api_key: SecretString,
    /// Upper bound on one request, connection included.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key: String = api_key.into();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: SecretString::new(api_key.into_boxed_str()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the config from `ALPHAVANTAGE_*` environment variables alone.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(FileConfig::default())
    }

    /// Parses a TOML document, falling back to the environment for absent keys.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(content)?;
        Self::resolve(file)
    }

    /// Reads and parses a TOML config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded client config file");
        Self::from_toml_str(&content)
    }

    fn resolve(file: FileConfig) -> Result<Self, ConfigError> {
        let api_key = match file.api_key.filter(|key| !key.trim().is_empty()) {
            Some(key) => key,
            None => get_env_var(API_KEY_VAR)?,
        };
        if api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: API_KEY_VAR,
                message: "must not be blank".to_string(),
            });
        }

        let base_url = file
            .base_url
            .or_else(|| get_optional_env_var(BASE_URL_VAR))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match file.timeout_secs {
            Some(secs) => Some(secs),
            None => parse_optional_env_var::<u64>(TIMEOUT_VAR)?,
        };
        let timeout = match timeout_secs {
            Some(0) => {
                return Err(ConfigError::InvalidValue {
                    name: "timeout_secs",
                    message: "must be a positive number of seconds".to_string(),
                });
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self::new(api_key.trim().to_string())
            .with_base_url(base_url)
            .with_timeout(timeout))
    }
}
