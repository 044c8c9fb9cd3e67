//! Error types for picker configuration.

use std::path::PathBuf;
use swatch_core::ColorParseError;
use thiserror::Error;

/// Errors that can occur while loading or validating a [`PickerConfig`](crate::PickerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse picker config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A configured color could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(#[from] ColorParseError),

    /// A value is out of its allowed range.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// The offending key.
        key: String,
        /// What is wrong with it.
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
