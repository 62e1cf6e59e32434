use std::path::PathBuf;

use shared_utils::env::{InvalidEnvVarError, MissingEnvVarError};
use thiserror::Error;

/// Errors raised while assembling a [`ClientConfig`](crate::config::ClientConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unexpected keys.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// No API key in the file and none in the environment.
    #[error(transparent)]
    MissingEnvVar(#[from] MissingEnvVarError),

    /// An environment override could not be parsed.
    #[error(transparent)]
    InvalidEnvVar(#[from] InvalidEnvVarError),

    /// A configured value is out of range.
    #[error("Invalid value for {name}: {message}")]
    InvalidValue { name: &'static str, message: String },
}
