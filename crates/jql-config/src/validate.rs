//! Configuration validation.
//!
//! Reports settings that load fine but are unlikely to do what the author meant.

use std::fmt;

use jql_query::{
    ENGLISH,
    messages::{argument_count, placeholders},
};

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A message template is defined for a key the parser never produces.
    UnknownMessageKey {
        /// Locale of the template.
        locale: String,
        /// The unrecognised key.
        key: String,
    },
    /// A template references an argument the message does not carry.
    MissingArgument {
        /// Locale of the template.
        locale: String,
        /// Message key.
        key: String,
        /// Placeholder index with no matching argument.
        index: usize,
    },
    /// The selected locale has no templates, so messages fall back to English.
    LocaleWithoutTemplates {
        /// The selected locale.
        locale: String,
    },
    /// System fields are disabled and no other fields are listed.
    NoFieldsKnown,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMessageKey { locale, key } => {
                write!(f, "template for unknown message key '{key}' in locale '{locale}'")
            }
            Self::MissingArgument { locale, key, index } => {
                write!(
                    f,
                    "template '{key}' in locale '{locale}' references missing argument {{{index}}}"
                )
            }
            Self::LocaleWithoutTemplates { locale } => {
                write!(f, "locale '{locale}' has no templates; English is used")
            }
            Self::NoFieldsKnown => {
                write!(f, "system fields are disabled and no fields are listed")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if !config.fields.system && config.fields.known.is_empty() {
        warnings.push(ConfigWarning::NoFieldsKnown);
    }

    let locale = &config.messages.locale;
    let base = locale.split(['-', '_']).next().unwrap_or(locale);
    if base != ENGLISH
        && !config.messages.catalog.contains_key(locale)
        && !config.messages.catalog.contains_key(base)
    {
        warnings.push(ConfigWarning::LocaleWithoutTemplates {
            locale: locale.clone(),
        });
    }

    for (locale, templates) in &config.messages.catalog {
        for (key, template) in templates {
            warnings.extend(validate_template(locale, key, template));
        }
    }

    warnings
}

/// Checks one template against the key's argument count.
fn validate_template(locale: &str, key: &str, template: &str) -> Vec<ConfigWarning> {
    let Some(count) = argument_count(key) else {
        return vec![ConfigWarning::UnknownMessageKey {
            locale: locale.to_string(),
            key: key.to_string(),
        }];
    };

    let mut indices = placeholders(template);
    indices.sort_unstable();
    indices.dedup();
    indices
        .into_iter()
        .filter(|index| *index >= count)
        .map(|index| ConfigWarning::MissingArgument {
            locale: locale.to_string(),
            key: key.to_string(),
            index,
        })
        .collect()
}
