//! Parse diagnostics.
//!
//! A [`JqlParseErrorMessage`] is pure data: a translation key, its ordered arguments and an
//! optional position. It is rendered into text only at the boundary, through a
//! [`Translator`]. [`JqlParseException`] is the error returned by the parser and wraps exactly
//! one message.

use std::{error::Error, fmt};

use thiserror::Error;

use crate::{
    ast::Operator,
    keys,
    lexer::Position,
    messages::{Catalog, ENGLISH, Translator},
    strings,
};

/// Significant digits a decimal literal can carry without rounding.
const DECIMAL_DIGITS: u32 = 28;

/// Placeholder for an unknown line or column.
const UNKNOWN_POSITION: &str = "?";

/// A positioned, parameterized, localizable diagnostic.
///
/// Positioned messages always start their arguments with the line and column as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JqlParseErrorMessage {
    /// Translation key, one of [`keys`].
    key: String,
    /// Ordered arguments for the message template.
    args: Vec<String>,
    /// 1-based line.
    line: Option<usize>,
    /// 1-based column.
    column: Option<usize>,
}

impl JqlParseErrorMessage {
    /// Creates a positioned message. `line` and `column` are 1-based; zero means unknown.
    ///
    /// When the line is unknown both position arguments render as `?`. Line breaks in `extra`
    /// are replaced with spaces.
    pub fn new<I, S>(key: &str, line: Option<usize>, column: Option<usize>, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let line = line.filter(|&l| l > 0);
        let column = column.filter(|&c| c > 0);
        let mut args = match line {
            Some(l) => vec![
                l.to_string(),
                column.map_or_else(|| UNKNOWN_POSITION.to_string(), |c| c.to_string()),
            ],
            None => vec![UNKNOWN_POSITION.to_string(), UNKNOWN_POSITION.to_string()],
        };
        args.extend(extra.into_iter().map(|a| normalize(a.as_ref())));
        Self {
            key: key.to_string(),
            args,
            line,
            column,
        }
    }

    /// Creates a message positioned at a lexer position.
    pub fn at<I, S>(key: &str, position: Position, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(key, Some(position.line), Some(position.column + 1), extra)
    }

    /// Creates a message without a position. Arguments are kept verbatim.
    pub fn without_position<I, S>(key: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            line: None,
            column: None,
        }
    }

    /// Translation key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Template arguments, including the leading line and column for positioned messages.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// 1-based line, if known.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// 1-based column, if known.
    pub fn column(&self) -> Option<usize> {
        self.column
    }

    /// Renders the message for `locale`.
    pub fn render(&self, translator: &dyn Translator, locale: &str) -> String {
        translator.translate(&self.key, &self.args, locale)
    }

    /// Generic failure, positioned when a position is known.
    pub fn unknown(position: Option<Position>) -> Self {
        match position {
            Some(p) => Self::at(keys::UNKNOWN, p, no_args()),
            None => Self::without_position(keys::UNKNOWN_NO_POS, no_args()),
        }
    }

    /// Unquoted reserved word.
    pub fn reserved_word(word: &str, position: Position) -> Self {
        Self::at(keys::RESERVED_WORD, position, [word])
    }

    /// Grammar keyword in field position.
    pub fn reserved_word_as_field(word: &str, position: Position) -> Self {
        Self::at(keys::RESERVED_WORD_AS_FIELD, position, [word])
    }

    /// Malformed escape. A blank escape text selects the `.blank` variant.
    pub fn illegal_escape(escape: &str, position: Position) -> Self {
        if escape.trim().is_empty() {
            Self::at(keys::ILLEGAL_ESCAPE_BLANK, position, no_args())
        } else {
            Self::at(keys::ILLEGAL_ESCAPE, position, [escape])
        }
    }

    /// Reserved character outside quotes.
    pub fn reserved_character(c: char, position: Position) -> Self {
        Self::at(
            keys::RESERVED_CHARACTER,
            position,
            [strings::char_display(c), strings::char_escape(c)],
        )
    }

    /// Control character or non-character.
    pub fn illegal_character(c: char, position: Position) -> Self {
        Self::at(
            keys::ILLEGAL_CHARACTER,
            position,
            [strings::char_display(c), strings::char_escape(c)],
        )
    }

    /// Unterminated quoted string. A blank partial text selects the `.blank` variant.
    pub fn unfinished_string(partial: &str, position: Position) -> Self {
        if partial.trim().is_empty() {
            Self::at(keys::UNFINISHED_STRING_BLANK, position, no_args())
        } else {
            Self::at(keys::UNFINISHED_STRING, position, [partial])
        }
    }

    /// Integer literal outside the `i64` range.
    pub fn illegal_number(number: &str, position: Position) -> Self {
        Self::at(
            keys::ILLEGAL_NUMBER,
            position,
            [number.to_string(), i64::MIN.to_string(), i64::MAX.to_string()],
        )
    }

    /// Decimal literal that would be rounded or overflow.
    pub fn illegal_decimal(number: &str, position: Position) -> Self {
        Self::at(
            keys::ILLEGAL_DECIMAL,
            position,
            [number.to_string(), DECIMAL_DIGITS.to_string()],
        )
    }

    /// Blank field name.
    pub fn empty_field_name(position: Position) -> Self {
        Self::at(keys::EMPTY_FIELD, position, no_args())
    }

    /// Blank function name.
    pub fn empty_function_name(position: Position) -> Self {
        Self::at(keys::EMPTY_FUNCTION, position, no_args())
    }

    /// A token that cannot start a field name.
    pub fn no_field(found: Option<&str>, position: Position) -> Self {
        Self::with_found(keys::NO_FIELD, keys::NO_FIELD_EOF, found, position)
    }

    /// A `[` with no `cf` before it.
    pub fn no_cf_field(position: Position) -> Self {
        Self::at(keys::NO_CF_FIELD, position, no_args())
    }

    /// A word where a sort direction was expected.
    pub fn bad_sort_order(found: &str, position: Position) -> Self {
        Self::at(keys::NO_ORDER, position, [found])
    }

    /// A token that is not an operator.
    pub fn no_operator(found: Option<&str>, position: Position) -> Self {
        Self::with_found(keys::NO_OPERATOR, keys::NO_OPERATOR_EOF, found, position)
    }

    /// Malformed custom field id.
    pub fn bad_custom_field_id(found: Option<&str>, position: Position) -> Self {
        Self::with_found(
            keys::BAD_CUSTOM_FIELD_ID,
            keys::BAD_CUSTOM_FIELD_ID_EOF,
            found,
            position,
        )
    }

    /// Malformed entity property reference.
    pub fn bad_property_id(found: Option<&str>, position: Position) -> Self {
        Self::with_found(keys::BAD_PROPERTY_ID, keys::BAD_PROPERTY_ID_EOF, found, position)
    }

    /// A token where `AND` or `OR` was expected.
    pub fn need_logical_operator(found: Option<&str>, position: Position) -> Self {
        Self::with_found(
            keys::LOGICAL_OPERATOR,
            keys::LOGICAL_OPERATOR_EOF,
            found,
            position,
        )
    }

    /// A token that cannot be an operand.
    pub fn bad_operand(found: Option<&str>, position: Position) -> Self {
        Self::with_found(keys::BAD_OPERAND, keys::BAD_OPERAND_EOF, found, position)
    }

    /// A token that cannot be a function argument.
    pub fn bad_function_argument(found: Option<&str>, position: Position) -> Self {
        Self::with_found(
            keys::BAD_FUNCTION_ARGUMENT,
            keys::BAD_FUNCTION_ARGUMENT_EOF,
            found,
            position,
        )
    }

    /// A `)` directly after a `,` in an argument list.
    pub fn empty_function_argument(position: Position) -> Self {
        Self::at(keys::EMPTY_FUNCTION_ARGUMENT, position, no_args())
    }

    /// `expected` was required but `found` was read instead.
    pub fn expected_text(expected: &str, found: Option<&str>, position: Position) -> Self {
        match found {
            Some(found) => Self::at(keys::EXPECTED_TEXT, position, [expected, found]),
            None => Self::at(keys::EXPECTED_TEXT_EOF, position, [expected]),
        }
    }

    /// Either `first` or `second` was required but `found` was read instead.
    pub fn expected_text2(
        first: &str,
        second: &str,
        found: Option<&str>,
        position: Position,
    ) -> Self {
        match found {
            Some(found) => Self::at(keys::EXPECTED_TEXT_2, position, [first, second, found]),
            None => Self::at(keys::EXPECTED_TEXT_2_EOF, position, [first, second]),
        }
    }

    /// A boolean operator with no clause after it.
    pub fn expected_clause(operator: &str, position: Position) -> Self {
        Self::at(keys::EXPECTED_CLAUSE, position, [operator])
    }

    /// `ORDER BY` repeated or inside a group.
    pub fn illegal_order_by(position: Position) -> Self {
        Self::at(keys::ILLEGAL_ORDER_BY, position, no_args())
    }

    /// The same history predicate written twice in one clause.
    pub fn duplicate_predicate(keyword: &str, position: Position) -> Self {
        Self::at(keys::DUPLICATE_PREDICATE, position, [keyword])
    }

    /// A history predicate the operator does not accept.
    pub fn unsupported_predicate(keyword: &str, operator: &str, position: Position) -> Self {
        Self::at(keys::UNSUPPORTED_PREDICATE, position, [keyword, operator])
    }

    /// Nesting deeper than `max_depth`.
    pub fn too_complex(max_depth: usize, position: Position) -> Self {
        Self::at(keys::TOO_COMPLEX, position, [max_depth.to_string()])
    }

    /// Blank input where a clause is required.
    pub fn blank_input() -> Self {
        Self::without_position(keys::BLANK_INPUT, no_args())
    }

    /// Picks the found or end-of-input variant of a key.
    fn with_found(key: &str, eof_key: &str, found: Option<&str>, position: Position) -> Self {
        match found {
            Some(found) => Self::at(key, position, [found]),
            None => Self::at(eof_key, position, no_args()),
        }
    }
}

/// Empty argument list.
fn no_args() -> [&'static str; 0] {
    []
}

/// Replaces line breaks with spaces.
fn normalize(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

/// The error returned when a query cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JqlParseException {
    /// The single diagnostic.
    message: JqlParseErrorMessage,
}

impl JqlParseException {
    /// Wraps a diagnostic.
    pub fn new(message: JqlParseErrorMessage) -> Self {
        Self { message }
    }

    /// The diagnostic.
    pub fn message(&self) -> &JqlParseErrorMessage {
        &self.message
    }

    /// Consumes the error, returning the diagnostic.
    pub fn into_message(self) -> JqlParseErrorMessage {
        self.message
    }

    /// 1-based line, if known.
    pub fn line(&self) -> Option<usize> {
        self.message.line
    }

    /// 1-based column, if known.
    pub fn column(&self) -> Option<usize> {
        self.message.column
    }

    /// Formats the error with the offending line of `query` and a caret under the column.
    pub fn format_with_context(
        &self,
        query: &str,
        translator: &dyn Translator,
        locale: &str,
    ) -> String {
        let mut result = format!(
            "jql syntax error: {}",
            self.message.render(translator, locale)
        );
        if let Some(line) = self.message.line
            && let Some(text) = query.lines().nth(line - 1)
        {
            let width = text.chars().count();
            let offset = self.message.column.map_or(0, |c| c - 1).min(width);
            result.push_str(&format!("\n  {text}\n  {}^", " ".repeat(offset)));
        }
        result
    }
}

impl From<JqlParseErrorMessage> for JqlParseException {
    fn from(message: JqlParseErrorMessage) -> Self {
        Self::new(message)
    }
}

impl fmt::Display for JqlParseException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message.render(&Catalog::default(), ENGLISH))
    }
}

impl Error for JqlParseException {}

/// Rejected direct construction of an AST node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    /// An `AND` or `OR` with fewer than two children.
    #[error("{combinator} clause needs at least two children, got {count}")]
    TooFewChildren {
        /// `AND` or `OR`.
        combinator: &'static str,
        /// Number of children supplied.
        count: usize,
    },
    /// A multi-value operand inside another.
    #[error("multi-value operands cannot be nested")]
    NestedMultiValue,
    /// A blank field, function or sort name.
    #[error("{what} name must not be blank")]
    BlankName {
        /// What was being named.
        what: &'static str,
    },
    /// An operand the operator does not accept.
    #[error("operator {operator} requires {expected}")]
    OperandMismatch {
        /// The operator.
        operator: Operator,
        /// Description of what the operator accepts.
        expected: &'static str,
    },
    /// An operator used with the wrong clause type.
    #[error("operator {operator} cannot be used in {clause} clauses")]
    WrongClauseOperator {
        /// The operator.
        operator: Operator,
        /// The clause type.
        clause: &'static str,
    },
    /// A history predicate the operator does not accept.
    #[error("{predicate} is not supported by {operator}")]
    UnsupportedPredicate {
        /// Predicate keyword.
        predicate: &'static str,
        /// The operator.
        operator: Operator,
    },
    /// The same history predicate twice in one group.
    #[error("{predicate} appears more than once")]
    DuplicatePredicate {
        /// Predicate keyword.
        predicate: &'static str,
    },
    /// A predicate group with fewer than two members, or one containing another group.
    #[error("predicate groups need at least two non-group predicates")]
    InvalidPredicateGroup,
    /// An entity property with no key, or an empty or malformed segment.
    #[error("property paths need a key and non-empty, dot-free segments")]
    InvalidPropertySegment,
}
