//! Configuration system for jql.
//!
//! jql reads TOML files named `.jql.toml`. It walks up the directory tree from the working
//! directory and collects every `.jql.toml` it finds, then loads `~/.jql.toml` as the global
//! config with the lowest precedence. The merged [`Config`] builds the query crate's resolvers,
//! message catalog and parser options.

#![warn(missing_docs)]

mod defaults;
mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};

pub use defaults::{SYSTEM_FIELDS, SYSTEM_FUNCTIONS};
pub use discovery::{
    CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config,
    require_global_config_path,
};
pub use error::ConfigError;
use jql_query::{
    Catalog, DEFAULT_MAX_DEPTH, ENGLISH, JqlQueryParser, JqlValidator, ParserOptions,
    StaticFieldResolver, StaticFunctionResolver,
};
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawFields, RawMessages, RawParserSettings, parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
use tracing::debug;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Fully merged jql configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parser limits.
    pub parser: ParserSettings,
    /// Known field names.
    pub fields: FieldSettings,
    /// Function overrides: name -> enabled. Applied on top of [`SYSTEM_FUNCTIONS`].
    pub functions: BTreeMap<String, bool>,
    /// Error message locale and templates.
    pub messages: MessageSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
    /// Files that contributed, highest precedence first.
    pub sources: Vec<PathBuf>,
}

impl Config {
    /// Discovers, parses and merges every `.jql.toml` that applies to `cwd`.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let files = discover_config_files(cwd);
        debug!(cwd = %cwd.display(), count = files.len(), "discovered config files");
        Self::load_from_files(&files)
    }

    /// Loads and merges the given files, highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                debug!(path = %path.display(), "loading config file");
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Field resolver holding the system fields (unless disabled) and the configured names.
    pub fn field_resolver(&self) -> StaticFieldResolver {
        let system: &[&str] = if self.fields.system {
            SYSTEM_FIELDS
        } else {
            &[]
        };
        StaticFieldResolver::new(
            system
                .iter()
                .copied()
                .chain(self.fields.known.iter().map(String::as_str)),
        )
    }

    /// Function resolver holding the system functions with the configured overrides applied.
    pub fn function_resolver(&self) -> StaticFunctionResolver {
        let resolver =
            StaticFunctionResolver::new(SYSTEM_FUNCTIONS.iter().map(|name| (*name, true)));
        for (name, enabled) in &self.functions {
            resolver.register(name, *enabled);
        }
        resolver
    }

    /// Message catalog with the configured templates layered over the built-in English.
    pub fn catalog(&self) -> Catalog {
        self.messages
            .catalog
            .iter()
            .fold(Catalog::new(), |catalog, (locale, templates)| {
                catalog.with_locale(locale, templates.iter())
            })
    }

    /// Parser options for the configured limits.
    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            max_depth: self.parser.max_depth,
        }
    }

    /// A parser using [`Self::parser_options`].
    pub fn parser(&self) -> JqlQueryParser {
        JqlQueryParser::new(self.parser_options())
    }

    /// A validator over [`Self::field_resolver`] and [`Self::function_resolver`].
    pub fn validator(&self) -> JqlValidator {
        JqlValidator::new(
            Arc::new(self.field_resolver()),
            Arc::new(self.function_resolver()),
        )
    }

    /// Checks the configuration for suspicious but non-fatal settings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Renders the effective settings in `.jql.toml` form.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableConfig {
            parser: &self.parser,
            fields: &self.fields,
            functions: &self.functions,
            messages: &self.messages,
        };
        toml::to_string_pretty(&serializable).map_err(|source| ConfigError::Serialize { source })
    }
}

/// Parser limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Deepest permitted nesting of groups and `NOT`.
    pub max_depth: usize,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Field names the validator accepts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldSettings {
    /// Whether [`SYSTEM_FIELDS`] are known.
    pub system: bool,
    /// Additional names, sorted and unique.
    pub known: Vec<String>,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            system: true,
            known: Vec::new(),
        }
    }
}

/// Error message settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MessageSettings {
    /// Locale used when rendering errors.
    pub locale: String,
    /// Locale -> message key -> template.
    pub catalog: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for MessageSettings {
    fn default() -> Self {
        Self {
            locale: ENGLISH.to_string(),
            catalog: BTreeMap::new(),
        }
    }
}

/// Borrowed view of [`Config`] for TOML output.
#[derive(Serialize)]
struct SerializableConfig<'a> {
    /// Parser limits.
    parser: &'a ParserSettings,
    /// Known field names.
    fields: &'a FieldSettings,
    /// Function overrides.
    functions: &'a BTreeMap<String, bool>,
    /// Message settings.
    messages: &'a MessageSettings,
}

#[cfg(test)]
mod tests {
    use jql_query::{FieldResolver, FunctionResolver, Translator, keys};

    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.parser.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.fields.system);
        assert!(config.fields.known.is_empty());
        assert!(config.functions.is_empty());
        assert_eq!(config.messages.locale, "en");
        assert!(config.config_root.is_none());
        assert!(config.sources.is_empty());
    }

    #[test]
    fn field_resolver_merges_system_and_known() {
        let mut config = Config::default();
        config.fields.known = vec!["Story Points".into()];

        let resolver = config.field_resolver();
        assert!(resolver.exists("project"));
        assert!(resolver.exists("story points"));
        assert!(!resolver.exists("nonsense"));

        config.fields.system = false;
        let resolver = config.field_resolver();
        assert!(!resolver.exists("project"));
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn function_overrides() {
        let mut config = Config::default();
        config.functions.insert("currentUser".into(), false);
        config.functions.insert("myFunction".into(), true);

        let resolver = config.function_resolver();
        assert!(resolver.exists("currentUser"));
        assert!(!resolver.is_enabled("currentUser"));
        assert!(resolver.is_enabled("myFunction"));
        assert!(resolver.is_enabled("membersOf"));
        assert!(!resolver.exists("unheardOf"));
    }

    #[test]
    fn catalog_uses_configured_templates() {
        let mut config = Config::default();
        config.messages.catalog.insert(
            "de".into(),
            BTreeMap::from([(keys::BLANK_INPUT.to_string(), "Leer.".to_string())]),
        );

        let catalog = config.catalog();
        assert_eq!(catalog.translate(keys::BLANK_INPUT, &[], "de"), "Leer.");
        assert_eq!(catalog.locales(), vec!["de"]);
    }

    #[test]
    fn parser_uses_max_depth() {
        let mut config = Config::default();
        config.parser.max_depth = 1;
        assert!(config.parser().parse_query("(a = b)").is_ok());
        assert!(config.parser().parse_query("((a = b))").is_err());
    }

    #[test]
    fn validator_uses_resolvers() {
        let validator = Config::default().validator();
        assert!(validator.is_valid_field_name("assignee"));
        assert!(validator.is_valid_field_name("cf[10010]"));
        assert!(validator.is_valid_function_name("currentUser"));
        assert!(!validator.is_valid_function_name("nope"));
    }

    #[test]
    fn to_toml_round_trips() {
        let mut config = Config::default();
        config.fields.known = vec!["team".into()];
        config.functions.insert("legacy".into(), false);

        let text = config.to_toml().unwrap();
        assert!(text.contains("[parser]"));
        assert!(text.contains("max_depth = 128"));
        assert!(text.contains("[functions]"));
        assert!(text.contains("legacy = false"));

        let raw = parse_config_str(&text, Path::new("effective.toml")).unwrap();
        assert_eq!(raw.fields.unwrap().known, vec!["team"]);
        assert_eq!(raw.messages.unwrap().locale.as_deref(), Some("en"));
    }
}
