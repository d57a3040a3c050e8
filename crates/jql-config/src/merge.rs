//! Configuration merging.
//!
//! Layers parsed files into a single [`Config`].

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use jql_query::MAX_DEPTH_LIMIT;
use tracing::debug;

use crate::{Config, ConfigError, FieldSettings, MessageSettings, ParserSettings, parse::RawConfig};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges parsed files, highest precedence first, into a resolved [`Config`].
///
/// Merge rules:
/// - Scalar settings: first defined value wins
/// - `[fields] known`: union of every file
/// - `[functions]` and message templates: merged by key, first definition wins
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let config = Config {
        parser: merge_parser(configs)?,
        fields: merge_fields(configs),
        functions: merge_functions(configs)?,
        messages: merge_messages(configs)?,
        config_root: configs
            .first()
            .and_then(|c| c.path.parent())
            .map(Path::to_path_buf),
        sources: configs.iter().map(|c| c.path.clone()).collect(),
    };
    debug!(
        sources = config.sources.len(),
        max_depth = config.parser.max_depth,
        fields = config.fields.known.len(),
        functions = config.functions.len(),
        "merged configuration"
    );
    Ok(config)
}

/// Returns the first value `get` finds, with the file that defined it.
fn first_defined<'a, T>(
    configs: &'a [ParsedConfig],
    get: impl Fn(&'a RawConfig) -> Option<T>,
) -> Option<(T, &'a Path)> {
    configs
        .iter()
        .find_map(|parsed| get(&parsed.config).map(|value| (value, parsed.path.as_path())))
}

/// Builds an [`ConfigError::InvalidSetting`].
fn invalid(path: &Path, setting: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidSetting {
        path: path.to_path_buf(),
        setting: setting.to_string(),
        reason: reason.to_string(),
    }
}

/// Merges `[parser]`.
fn merge_parser(configs: &[ParsedConfig]) -> Result<ParserSettings, ConfigError> {
    let mut result = ParserSettings::default();
    if let Some((max_depth, path)) =
        first_defined(configs, |c| c.parser.as_ref().and_then(|p| p.max_depth))
    {
        if !(1..=MAX_DEPTH_LIMIT).contains(&max_depth) {
            let reason = format!("must be between 1 and {MAX_DEPTH_LIMIT}");
            return Err(invalid(path, "parser.max_depth", &reason));
        }
        result.max_depth = max_depth;
    }
    Ok(result)
}

/// Merges `[fields]`.
fn merge_fields(configs: &[ParsedConfig]) -> FieldSettings {
    let mut result = FieldSettings::default();
    if let Some((system, _)) = first_defined(configs, |c| c.fields.as_ref().and_then(|f| f.system))
    {
        result.system = system;
    }

    let known: BTreeSet<&str> = configs
        .iter()
        .filter_map(|parsed| parsed.config.fields.as_ref())
        .flat_map(|fields| fields.known.iter())
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .collect();
    result.known = known.into_iter().map(String::from).collect();
    result
}

/// Merges `[functions]`. Names match case-insensitively; the closest spelling is kept.
fn merge_functions(configs: &[ParsedConfig]) -> Result<BTreeMap<String, bool>, ConfigError> {
    let mut result = BTreeMap::new();
    let mut seen = BTreeSet::new();
    for parsed in configs {
        let Some(ref functions) = parsed.config.functions else {
            continue;
        };
        for (name, enabled) in functions {
            if name.trim().is_empty() {
                return Err(invalid(&parsed.path, "functions", "function names must not be blank"));
            }
            if seen.insert(name.to_lowercase()) {
                result.insert(name.clone(), *enabled);
            }
        }
    }
    Ok(result)
}

/// Merges `[messages]`.
fn merge_messages(configs: &[ParsedConfig]) -> Result<MessageSettings, ConfigError> {
    let mut result = MessageSettings::default();
    if let Some((locale, path)) = first_defined(configs, |c| {
        c.messages.as_ref().and_then(|m| m.locale.as_deref())
    }) {
        if locale.trim().is_empty() {
            return Err(invalid(path, "messages.locale", "must not be blank"));
        }
        result.locale = locale.to_string();
    }

    for parsed in configs {
        let Some(catalog) = parsed
            .config
            .messages
            .as_ref()
            .and_then(|m| m.catalog.as_ref())
        else {
            continue;
        };
        for (locale, templates) in catalog {
            let merged = result.catalog.entry(locale.clone()).or_default();
            for (key, template) in templates {
                merged.entry(key.clone()).or_insert_with(|| template.clone());
            }
        }
    }
    Ok(result)
}
