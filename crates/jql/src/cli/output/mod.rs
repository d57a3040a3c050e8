//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

pub use jql_highlight::{dim, header, success, warning};
use jql_highlight::error_context;
use jql_query::{JqlParseException, Query, Translator, ValidationIssue};
use serde::Serialize;

/// JSON output for a parsed query.
#[derive(Serialize)]
pub struct JsonParsed<'a> {
    /// Canonical rendering of the query.
    pub canonical: String,
    /// The syntax tree.
    pub query: &'a Query,
}

/// JSON output for `jql validate`.
#[derive(Serialize)]
pub struct JsonValidated<'a> {
    /// Canonical rendering of the query.
    pub canonical: String,
    /// True when no issues were found.
    pub valid: bool,
    /// Unknown fields and unknown or disabled functions.
    pub issues: &'a [ValidationIssue],
}

/// JSON output for a syntax error.
#[derive(Serialize)]
pub struct JsonParseError {
    /// The error.
    pub error: JsonErrorBody,
}

/// Fields of a syntax error.
#[derive(Serialize)]
pub struct JsonErrorBody {
    /// Message key.
    pub key: String,
    /// Message arguments, position first when known.
    pub args: Vec<String>,
    /// 1-based line.
    pub line: Option<usize>,
    /// 1-based column.
    pub column: Option<usize>,
    /// Translated message.
    pub message: String,
}

impl JsonParseError {
    /// Captures `error` with its message rendered for `locale`.
    pub fn new(error: &JqlParseException, translator: &dyn Translator, locale: &str) -> Self {
        let message = error.message();
        Self {
            error: JsonErrorBody {
                key: message.key().to_string(),
                args: message.args().to_vec(),
                line: message.line(),
                column: message.column(),
                message: message.render(translator, locale),
            },
        }
    }
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Reports a syntax error, as JSON on stdout or with context on stderr. Always a failure.
pub fn report_parse_error(
    error: &JqlParseException,
    query: &str,
    translator: &dyn Translator,
    locale: &str,
    json: bool,
) -> ExitCode {
    if json {
        print_json(&JsonParseError::new(error, translator, locale));
    } else {
        eprint!(
            "{}",
            error_context(&error.format_with_context(query, translator, locale))
        );
    }
    ExitCode::FAILURE
}

/// Prints validation issues as a bulleted list.
pub fn print_issues(issues: &[ValidationIssue]) {
    println!("{}", header(&format!("Issues ({}):", issues.len())));
    for issue in issues {
        println!("  - {}", warning(&issue.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use jql_query::{Catalog, parse};

    use super::*;

    #[test]
    fn parse_error_json_shape() {
        let error = parse("a = b AND").unwrap_err();
        let json = serde_json::to_value(JsonParseError::new(&error, &Catalog::new(), "en")).unwrap();
        assert_eq!(json["error"]["key"], "jql.parse.expected.clause");
        assert_eq!(json["error"]["line"], 1);
        assert_eq!(json["error"]["column"], 10);
        assert_eq!(json["error"]["args"][2], "AND");
        assert!(
            json["error"]["message"]
                .as_str()
                .unwrap()
                .contains("\"AND\"")
        );
    }

    #[test]
    fn validated_json_shape() {
        let query = parse("a = b").unwrap();
        let issues = [ValidationIssue::UnknownField("a".into())];
        let json = serde_json::to_value(JsonValidated {
            canonical: query.to_string(),
            valid: false,
            issues: &issues,
        })
        .unwrap();
        assert_eq!(json["canonical"], "a = b");
        assert_eq!(json["issues"][0]["kind"], "unknown_field");
        assert_eq!(json["issues"][0]["name"], "a");
    }
}
