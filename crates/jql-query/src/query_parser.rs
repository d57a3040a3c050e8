//! Parser entry points.

use crate::{
    ast::{Clause, Query},
    error::{JqlParseErrorMessage, JqlParseException},
    parser::Parser,
};

/// Default maximum nesting depth of groups and negations.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Hard ceiling on [`ParserOptions::max_depth`]. Larger values are clamped to it.
pub const MAX_DEPTH_LIMIT: usize = 256;

/// Tunable parser limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Deepest allowed nesting of parentheses and `NOT`, at most [`MAX_DEPTH_LIMIT`].
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parses JQL text. Stateless apart from its options, so one instance can be shared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JqlQueryParser {
    /// Parser limits.
    options: ParserOptions,
}

impl JqlQueryParser {
    /// Creates a parser with the given options, clamping the depth to [`MAX_DEPTH_LIMIT`].
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options: ParserOptions {
                max_depth: options.max_depth.min(MAX_DEPTH_LIMIT),
            },
        }
    }

    /// Options in effect, after clamping.
    pub fn options(&self) -> ParserOptions {
        self.options
    }

    /// Parses a query with an optional `ORDER BY`. Blank input gives the empty query.
    pub fn parse_query(&self, input: &str) -> Result<Query, JqlParseException> {
        Parser::new(input, self.options.max_depth).parse_query()
    }

    /// Parses a where-clause. Blank input and `ORDER BY` are errors.
    pub fn parse_clause(&self, input: &str) -> Result<Clause, JqlParseException> {
        if input.trim().is_empty() {
            return Err(JqlParseErrorMessage::blank_input().into());
        }
        Parser::new(input, self.options.max_depth).parse_clause()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;

    #[test]
    fn blank_clause_is_positionless() {
        let error = JqlQueryParser::default().parse_clause(" \t").unwrap_err();
        assert_eq!(error.message().key(), keys::BLANK_INPUT);
        assert_eq!(error.line(), None);
        assert!(error.message().args().is_empty());
    }

    #[test]
    fn blank_query_is_empty() {
        let query = JqlQueryParser::default().parse_query("   ").unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn options_limit_depth() {
        let parser = JqlQueryParser::new(ParserOptions { max_depth: 2 });
        assert!(parser.parse_query("((a = b))").is_ok());
        let error = parser.parse_query("(((a = b)))").unwrap_err();
        assert_eq!(error.message().key(), keys::TOO_COMPLEX);
    }

    #[test]
    fn depth_is_clamped_to_limit() {
        let parser = JqlQueryParser::new(ParserOptions {
            max_depth: usize::MAX,
        });
        assert_eq!(parser.options().max_depth, MAX_DEPTH_LIMIT);
        assert_eq!(JqlQueryParser::default().options().max_depth, DEFAULT_MAX_DEPTH);

        let input = format!("{}a = b", "(".repeat(MAX_DEPTH_LIMIT * 4));
        let error = parser.parse_query(&input).unwrap_err();
        assert_eq!(error.message().key(), keys::TOO_COMPLEX);
        assert_eq!(error.message().args()[2], MAX_DEPTH_LIMIT.to_string());
    }

    #[test]
    fn parser_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JqlQueryParser>();
    }
}
