//! Configuration file parsing.
//!
//! Each `.jql.toml` becomes a [`RawConfig`] in which every setting is optional, so that partial
//! files can be layered by the merge step.

use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Configuration exactly as written in one TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, discovery stops here and ignores parent and global configs.
    pub root: Option<bool>,
    /// `[parser]` section.
    pub parser: Option<RawParserSettings>,
    /// `[fields]` section.
    pub fields: Option<RawFields>,
    /// `[functions]` table: function name -> enabled.
    pub functions: Option<BTreeMap<String, bool>>,
    /// `[messages]` section.
    pub messages: Option<RawMessages>,
}

/// Raw parser limits.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawParserSettings {
    /// Deepest permitted nesting of groups and `NOT`.
    pub max_depth: Option<usize>,
}

/// Raw field catalogue.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFields {
    /// Whether the built-in system fields are known.
    pub system: Option<bool>,
    /// Extra field names. Accepts a single string or an array.
    #[serde_as(as = "OneOrMany<_>")]
    pub known: Vec<String>,
}

/// Raw message settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMessages {
    /// Locale used when rendering errors.
    pub locale: Option<String>,
    /// Locale -> message key -> template.
    pub catalog: Option<BTreeMap<String, BTreeMap<String, String>>>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string; `path` is only used in errors.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Unreadable or malformed files count as non-root; loading reports them later.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    toml::from_str::<RawConfig>(&contents).is_ok_and(|config| config.root == Some(true))
}
