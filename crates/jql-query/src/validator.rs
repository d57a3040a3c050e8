//! Name, argument and value probes backed by pluggable registries.

use std::{fmt, sync::Arc};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    ast::Query,
    lexer::{NumberKind, Token, TokenKind, tokenize},
    resolver::{FieldResolver, FunctionResolver},
    strings,
};

/// A name in a parsed query that the registries do not accept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// Neither a custom field reference nor a known field.
    UnknownField(String),
    /// No function with this name is registered.
    UnknownFunction(String),
    /// The function is registered but disabled.
    DisabledFunction(String),
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField(name) => write!(f, "unknown field: {name}"),
            Self::UnknownFunction(name) => write!(f, "unknown function: {name}"),
            Self::DisabledFunction(name) => write!(f, "function is disabled: {name}"),
        }
    }
}

/// Predicates over names and values. None of them fail; anything unrecognized is `false`.
#[derive(Clone)]
pub struct JqlValidator {
    /// Field registry.
    fields: Arc<dyn FieldResolver>,
    /// Function registry.
    functions: Arc<dyn FunctionResolver>,
}

impl fmt::Debug for JqlValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JqlValidator").finish_non_exhaustive()
    }
}

impl JqlValidator {
    /// Creates a validator over the given registries.
    pub fn new(fields: Arc<dyn FieldResolver>, functions: Arc<dyn FunctionResolver>) -> Self {
        Self { fields, functions }
    }

    /// A custom field reference such as `cf[10010]`, or a field the registry knows.
    pub fn is_valid_field_name(&self, name: &str) -> bool {
        strings::custom_field_id(name).is_some() || self.fields.exists(name)
    }

    /// A registered, enabled function.
    pub fn is_valid_function_name(&self, name: &str) -> bool {
        self.functions.exists(name) && self.functions.is_enabled(name)
    }

    /// Text usable unquoted as a function argument. Numbers of any size qualify.
    pub fn is_valid_function_argument(&self, argument: &str) -> bool {
        single_plain_token(argument).is_some()
    }

    /// Text usable unquoted as a value. Numbers must fit the literal range.
    pub fn is_valid_value(&self, value: &str) -> bool {
        match single_plain_token(value).map(|t| t.kind) {
            Some(TokenKind::Number(NumberKind::Integer)) => value.parse::<i64>().is_ok(),
            Some(TokenKind::Number(NumberKind::Decimal)) => {
                Decimal::from_str_exact(value).is_ok()
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Checks every field and function in `query` against the registries.
    ///
    /// Each problem is reported once, in the order it first appears.
    pub fn validate(&self, query: &Query) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut report = |issue: ValidationIssue| {
            if !issues.contains(&issue) {
                issues.push(issue);
            }
        };

        let clause_fields = query.clause().map(|c| c.fields()).unwrap_or_default();
        let sort_fields = query.order_by().sorts().iter().map(|s| s.field());
        for field in clause_fields.into_iter().chain(sort_fields) {
            if !self.is_valid_field_name(field) {
                report(ValidationIssue::UnknownField(field.to_string()));
            }
        }

        for function in query.clause().map(|c| c.functions()).unwrap_or_default() {
            let name = function.name();
            if !self.functions.exists(name) {
                report(ValidationIssue::UnknownFunction(name.to_string()));
            } else if !self.functions.is_enabled(name) {
                report(ValidationIssue::DisabledFunction(name.to_string()));
            }
        }
        issues
    }
}

/// The single unquoted, escape-free identifier or number that makes up `text`, if any.
fn single_plain_token(text: &str) -> Option<Token> {
    let mut tokens = tokenize(text).into_iter();
    let token = tokens.next()?;
    let rest_is_eof = tokens.next().is_some_and(|t| t.is_eof());
    let plain = matches!(token.kind, TokenKind::Identifier | TokenKind::Number(_));
    // An escape or surrounding whitespace makes the token text differ from the input.
    (rest_is_eof && plain && token.text == text).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        JqlQueryParser,
        resolver::{StaticFieldResolver, StaticFunctionResolver},
    };

    fn validator() -> JqlValidator {
        JqlValidator::new(
            Arc::new(StaticFieldResolver::new(["project", "status", "assignee"])),
            Arc::new(StaticFunctionResolver::new([
                ("currentUser", true),
                ("legacy", false),
            ])),
        )
    }

    #[test]
    fn field_names() {
        let v = validator();
        for good in ["cf[4784]", "cf [4784]", "CF[000001]", "project", "Status"] {
            assert!(v.is_valid_field_name(good), "{good}");
        }
        for bad in ["cf[ 38", "cf[aaa]", "cf[-1232]", "priority", ""] {
            assert!(!v.is_valid_field_name(bad), "{bad}");
        }
    }

    #[test]
    fn function_names() {
        let v = validator();
        assert!(v.is_valid_function_name("currentUser"));
        assert!(!v.is_valid_function_name("legacy"));
        assert!(!v.is_valid_function_name("membersOf"));
    }

    #[test]
    fn values() {
        let v = validator();
        for good in ["nicename", "102748", "-3.25", "niceunicodename\u{3737}"] {
            assert!(v.is_valid_value(good), "{good}");
        }
        for bad in [
            "namewith\\bslash",
            "badnamewithescapes\\u5775",
            "name with spaces",
            "'quoted'",
            "",
            " ",
            "a{b",
            "and",
            "select",
            "99999999999999999999",
            "1.00000000000000000000000000000001",
        ] {
            assert!(!v.is_valid_value(bad), "{bad}");
        }
    }

    #[test]
    fn arguments_accept_any_number() {
        let v = validator();
        assert!(v.is_valid_function_argument("99999999999999999999"));
        assert!(v.is_valid_function_argument("-1d"));
        assert!(!v.is_valid_function_argument("two words"));
        assert!(!v.is_valid_function_argument("empty"));
    }

    #[test]
    fn validate_reports_each_problem_once() {
        let query = JqlQueryParser::default()
            .parse_query(
                "project = x AND priority = y AND priority = z AND a in legacy() \
                 AND assignee = missing() ORDER BY cf[10] DESC",
            )
            .unwrap();
        assert_eq!(
            validator().validate(&query),
            [
                ValidationIssue::UnknownField("priority".into()),
                ValidationIssue::UnknownField("a".into()),
                ValidationIssue::DisabledFunction("legacy".into()),
                ValidationIssue::UnknownFunction("missing".into()),
            ]
        );
    }
}
