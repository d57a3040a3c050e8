//! Message templates and translation.
//!
//! Templates use `{N}` placeholders for the message arguments. The built-in English templates
//! cover every key in [`keys`]; a [`Catalog`] layers locale-specific overrides on top.

use std::collections::HashMap;

use crate::keys;

/// Locale of the built-in templates.
pub const ENGLISH: &str = "en";

/// Turns a message key and its arguments into text.
pub trait Translator: Send + Sync {
    /// Renders `key` with `args` for `locale`.
    fn translate(&self, key: &str, args: &[String], locale: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str, &[String], &str) -> String + Send + Sync,
{
    fn translate(&self, key: &str, args: &[String], locale: &str) -> String {
        self(key, args, locale)
    }
}

/// Built-in template and argument count for each key.
const DEFAULTS: &[(&str, &str, usize)] = &[
    (keys::UNKNOWN, "Unable to parse the query at line {0}, column {1}.", 2),
    (keys::UNKNOWN_NO_POS, "Unable to parse the query.", 0),
    (
        keys::RESERVED_WORD,
        "\"{2}\" is a reserved word and must be quoted (line {0}, column {1}).",
        3,
    ),
    (
        keys::RESERVED_WORD_AS_FIELD,
        "Expecting a field name but got the reserved word \"{2}\" (line {0}, column {1}). Quote it to use it as a field name.",
        3,
    ),
    (
        keys::ILLEGAL_ESCAPE,
        "The escape sequence \"{2}\" at line {0}, column {1} is not valid.",
        3,
    ),
    (
        keys::ILLEGAL_ESCAPE_BLANK,
        "Incomplete escape sequence at line {0}, column {1}.",
        2,
    ),
    (
        keys::RESERVED_CHARACTER,
        "The character \"{2}\" is reserved and must be quoted or escaped as \"{3}\" (line {0}, column {1}).",
        4,
    ),
    (
        keys::ILLEGAL_CHARACTER,
        "The character \"{2}\" ({3}) is not allowed in a query (line {0}, column {1}).",
        4,
    ),
    (
        keys::UNFINISHED_STRING,
        "Missing closing quote for the string \"{2}\" that starts at line {0}, column {1}.",
        3,
    ),
    (
        keys::UNFINISHED_STRING_BLANK,
        "Missing closing quote for the string that starts at line {0}, column {1}.",
        2,
    ),
    (
        keys::ILLEGAL_NUMBER,
        "The number {2} at line {0}, column {1} must be between {3} and {4}.",
        5,
    ),
    (
        keys::ILLEGAL_DECIMAL,
        "The decimal {2} at line {0}, column {1} cannot be stored exactly; it may have at most {3} digits.",
        4,
    ),
    (keys::EMPTY_FIELD, "Field names cannot be empty (line {0}, column {1}).", 2),
    (keys::EMPTY_FUNCTION, "Function names cannot be empty (line {0}, column {1}).", 2),
    (
        keys::NO_FIELD,
        "Expecting a field name but got \"{2}\" at line {0}, column {1}.",
        3,
    ),
    (
        keys::NO_FIELD_EOF,
        "Expecting a field name at the end of the query (line {0}, column {1}).",
        2,
    ),
    (
        keys::NO_CF_FIELD,
        "Expecting \"cf\" before \"[\" at line {0}, column {1}.",
        2,
    ),
    (
        keys::NO_ORDER,
        "Expecting ASC or DESC but got \"{2}\" at line {0}, column {1}.",
        3,
    ),
    (
        keys::NO_OPERATOR,
        "Expecting an operator but got \"{2}\" at line {0}, column {1}. Valid operators are =, !=, ~, !~, <, <=, >, >=, IN, NOT IN, IS, IS NOT, WAS, WAS NOT, WAS IN, WAS NOT IN and CHANGED.",
        3,
    ),
    (
        keys::NO_OPERATOR_EOF,
        "Expecting an operator at the end of the query (line {0}, column {1}).",
        2,
    ),
    (
        keys::BAD_CUSTOM_FIELD_ID,
        "Expecting a non-negative custom field id but got \"{2}\" at line {0}, column {1}.",
        3,
    ),
    (
        keys::BAD_CUSTOM_FIELD_ID_EOF,
        "Expecting a custom field id at the end of the query (line {0}, column {1}).",
        2,
    ),
    (
        keys::BAD_PROPERTY_ID,
        "Expecting a property reference but got \"{2}\" at line {0}, column {1}.",
        3,
    ),
    (
        keys::BAD_PROPERTY_ID_EOF,
        "Expecting a property reference at the end of the query (line {0}, column {1}).",
        2,
    ),
    (
        keys::LOGICAL_OPERATOR,
        "Expecting AND or OR but got \"{2}\" at line {0}, column {1}.",
        3,
    ),
    (
        keys::LOGICAL_OPERATOR_EOF,
        "Expecting AND or OR at the end of the query (line {0}, column {1}).",
        2,
    ),
    (
        keys::BAD_OPERAND,
        "Expecting a value, list or function but got \"{2}\" at line {0}, column {1}.",
        3,
    ),
    (
        keys::BAD_OPERAND_EOF,
        "Expecting a value, list or function at the end of the query (line {0}, column {1}).",
        2,
    ),
    (
        keys::BAD_FUNCTION_ARGUMENT,
        "Expecting a function argument but got \"{2}\" at line {0}, column {1}.",
        3,
    ),
    (
        keys::BAD_FUNCTION_ARGUMENT_EOF,
        "Expecting a function argument at the end of the query (line {0}, column {1}).",
        2,
    ),
    (
        keys::EMPTY_FUNCTION_ARGUMENT,
        "Function arguments cannot be empty (line {0}, column {1}).",
        2,
    ),
    (
        keys::EXPECTED_TEXT,
        "Expecting \"{2}\" but got \"{3}\" at line {0}, column {1}.",
        4,
    ),
    (
        keys::EXPECTED_TEXT_EOF,
        "Expecting \"{2}\" at the end of the query (line {0}, column {1}).",
        3,
    ),
    (
        keys::EXPECTED_TEXT_2,
        "Expecting \"{2}\" or \"{3}\" but got \"{4}\" at line {0}, column {1}.",
        5,
    ),
    (
        keys::EXPECTED_TEXT_2_EOF,
        "Expecting \"{2}\" or \"{3}\" at the end of the query (line {0}, column {1}).",
        4,
    ),
    (
        keys::EXPECTED_CLAUSE,
        "Expecting a clause after \"{2}\" at line {0}, column {1}.",
        3,
    ),
    (
        keys::ILLEGAL_ORDER_BY,
        "ORDER BY may only appear once, at the end of the query (line {0}, column {1}).",
        2,
    ),
    (
        keys::DUPLICATE_PREDICATE,
        "The predicate {2} is used more than once (line {0}, column {1}).",
        3,
    ),
    (
        keys::UNSUPPORTED_PREDICATE,
        "The predicate {2} cannot be used with {3} (line {0}, column {1}).",
        4,
    ),
    (
        keys::TOO_COMPLEX,
        "The query is nested more than {2} levels deep (line {0}, column {1}).",
        3,
    ),
    (keys::BLANK_INPUT, "The query must not be blank.", 0),
];

/// Built-in English template for `key`.
pub fn default_template(key: &str) -> Option<&'static str> {
    DEFAULTS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, template, _)| *template)
}

/// Number of arguments a message with `key` carries, including the position.
pub fn argument_count(key: &str) -> Option<usize> {
    DEFAULTS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, _, count)| *count)
}

/// Indices of the `{N}` placeholders in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<usize> {
    let mut found = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                if let Ok(index) = after[..close].parse() {
                    found.push(index);
                }
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    found
}

/// Substitutes `{N}` placeholders. Placeholders with no matching argument are left as written.
pub fn format_template(template: &str, args: &[String]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let arg = after[..close]
                .parse::<usize>()
                .ok()
                .and_then(|i| args.get(i))?;
            Some((arg, close))
        });
        match substituted {
            Some((arg, close)) => {
                output.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                output.push('{');
                rest = after;
            }
        }
    }
    output.push_str(rest);
    output
}

/// Message templates by locale, falling back to the built-in English text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Locale → key → template.
    overrides: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    /// Creates a catalog with only the built-in templates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one template.
    pub fn insert(
        &mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) {
        self.overrides
            .entry(locale.into())
            .or_default()
            .insert(key.into(), template.into());
    }

    /// Adds every template in `templates` for `locale`.
    pub fn with_locale<I, K, V>(mut self, locale: &str, templates: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, template) in templates {
            self.insert(locale, key, template);
        }
        self
    }

    /// Locales with overrides, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.overrides.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    /// Looks up a template: the exact locale, then its base language, then English overrides,
    /// then the built-in text.
    pub fn template(&self, key: &str, locale: &str) -> Option<&str> {
        let base = locale.split(['-', '_']).next().unwrap_or(locale);
        [locale, base, ENGLISH]
            .into_iter()
            .find_map(|l| self.overrides.get(l).and_then(|t| t.get(key)))
            .map(String::as_str)
            .or_else(|| default_template(key))
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str, args: &[String], locale: &str) -> String {
        match self.template(key, locale) {
            Some(template) => format_template(template, args),
            None => key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn every_key_has_a_template() {
        for key in keys::ALL {
            assert!(default_template(key).is_some(), "{key}");
        }
        assert_eq!(DEFAULTS.len(), keys::ALL.len());
    }

    #[test]
    fn templates_only_reference_their_arguments() {
        for (key, template, count) in DEFAULTS {
            for index in placeholders(template) {
                assert!(index < *count, "{key} references {{{index}}}");
            }
        }
    }

    #[test]
    fn substitutes_placeholders() {
        assert_eq!(
            format_template("{2} at {0}:{1}", &args(&["1", "5", "foo"])),
            "foo at 1:5"
        );
    }

    #[test]
    fn leaves_unmatched_placeholders() {
        assert_eq!(format_template("{3} {x} {", &args(&["a"])), "{3} {x} {");
    }

    #[test]
    fn placeholder_indices() {
        assert_eq!(placeholders("{0} and {2}, {0} {y}"), vec![0, 2, 0]);
    }

    #[test]
    fn built_in_english() {
        let catalog = Catalog::new();
        let text = catalog.translate(keys::NO_FIELD, &args(&["1", "5", "="]), "en");
        assert_eq!(text, "Expecting a field name but got \"=\" at line 1, column 5.");
    }

    #[test]
    fn locale_fallback_chain() {
        let catalog = Catalog::new()
            .with_locale("de", [(keys::BLANK_INPUT, "Die Abfrage ist leer.")])
            .with_locale("de-CH", [(keys::UNKNOWN_NO_POS, "Fehler.")]);
        assert_eq!(catalog.translate(keys::UNKNOWN_NO_POS, &[], "de-CH"), "Fehler.");
        assert_eq!(
            catalog.translate(keys::BLANK_INPUT, &[], "de-CH"),
            "Die Abfrage ist leer."
        );
        assert_eq!(
            catalog.translate(keys::UNKNOWN_NO_POS, &[], "de"),
            "Unable to parse the query."
        );
        assert_eq!(catalog.locales(), vec!["de", "de-CH"]);
    }

    #[test]
    fn unknown_key_renders_as_key() {
        assert_eq!(Catalog::new().translate("no.such.key", &[], "en"), "no.such.key");
    }

    #[test]
    fn closures_translate() {
        let translator = |key: &str, args: &[String], _: &str| format!("{key}/{}", args.len());
        let t: &dyn Translator = &translator;
        assert_eq!(t.translate("k", &args(&["a", "b"]), "en"), "k/2");
    }
}
