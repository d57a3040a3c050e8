//! Error types for jql configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use toml::{de, ser};

/// Errors that can occur when loading or processing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// A setting holds a value outside its accepted range.
    #[error("invalid setting '{setting}' in {path}: {reason}")]
    InvalidSetting {
        /// File that defined the setting.
        path: PathBuf,
        /// Dotted name of the setting.
        setting: String,
        /// What is wrong with the value.
        reason: String,
    },

    /// Failed to render the effective configuration.
    #[error("failed to serialize configuration: {source}")]
    Serialize {
        /// Underlying TOML serialization error.
        source: ser::Error,
    },

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}
