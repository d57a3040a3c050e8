//! Translation keys for parse diagnostics.
//!
//! Every [`JqlParseErrorMessage`](crate::JqlParseErrorMessage) carries one of these keys. Keys
//! ending in `.eof` are the end-of-input variants of the key without the suffix.

/// Generic failure with a position.
pub const UNKNOWN: &str = "jql.parse.unknown";
/// Generic failure without a position.
pub const UNKNOWN_NO_POS: &str = "jql.parse.unknown.no.pos";
/// Unquoted reserved word.
pub const RESERVED_WORD: &str = "jql.parse.reserved.word";
/// Grammar keyword where a field name was expected.
pub const RESERVED_WORD_AS_FIELD: &str = "jql.parse.reserved.word.as.field";
/// Unknown backslash escape.
pub const ILLEGAL_ESCAPE: &str = "jql.parse.illegal.escape";
/// Backslash at the end of input.
pub const ILLEGAL_ESCAPE_BLANK: &str = "jql.parse.illegal.escape.blank";
/// Reserved character outside quotes.
pub const RESERVED_CHARACTER: &str = "jql.parse.reserved.character";
/// Control character or Unicode non-character.
pub const ILLEGAL_CHARACTER: &str = "jql.parse.illegal.character";
/// Quoted string without a closing quote.
pub const UNFINISHED_STRING: &str = "jql.parse.unfinished.string";
/// Quoted string without a closing quote or any content.
pub const UNFINISHED_STRING_BLANK: &str = "jql.parse.unfinished.string.blank";
/// Numeric literal outside the supported range.
pub const ILLEGAL_NUMBER: &str = "jql.parse.illegal.number";
/// Decimal literal with more precision or magnitude than can be stored exactly.
pub const ILLEGAL_DECIMAL: &str = "jql.parse.illegal.decimal";
/// Blank field name.
pub const EMPTY_FIELD: &str = "jql.parse.empty.field";
/// Blank function name.
pub const EMPTY_FUNCTION: &str = "jql.parse.empty.function";
/// Token that cannot start a field name.
pub const NO_FIELD: &str = "jql.parse.no.field";
/// End of input where a field name was expected.
pub const NO_FIELD_EOF: &str = "jql.parse.no.field.eof";
/// A `[` without the `cf` prefix.
pub const NO_CF_FIELD: &str = "jql.parse.no.cf.field";
/// Token where `ASC` or `DESC` was expected.
pub const NO_ORDER: &str = "jql.parse.no.order";
/// Token that is not an operator.
pub const NO_OPERATOR: &str = "jql.parse.no.operator";
/// End of input where an operator was expected.
pub const NO_OPERATOR_EOF: &str = "jql.parse.no.operator.eof";
/// Malformed custom field id.
pub const BAD_CUSTOM_FIELD_ID: &str = "jql.parse.bad.custom.field.id";
/// End of input where a custom field id was expected.
pub const BAD_CUSTOM_FIELD_ID_EOF: &str = "jql.parse.bad.custom.field.id.eof";
/// Malformed entity property reference.
pub const BAD_PROPERTY_ID: &str = "jql.parse.bad.property.id";
/// End of input inside an entity property reference.
pub const BAD_PROPERTY_ID_EOF: &str = "jql.parse.bad.property.id.eof";
/// Token where `AND` or `OR` was expected.
pub const LOGICAL_OPERATOR: &str = "jql.parse.logical.operator";
/// End of input where `AND` or `OR` was expected.
pub const LOGICAL_OPERATOR_EOF: &str = "jql.parse.logical.operator.eof";
/// Token that cannot be an operand.
pub const BAD_OPERAND: &str = "jql.parse.bad.operand";
/// End of input where an operand was expected.
pub const BAD_OPERAND_EOF: &str = "jql.parse.bad.operand.eof";
/// Token that cannot be a function argument.
pub const BAD_FUNCTION_ARGUMENT: &str = "jql.parse.bad.function.argument";
/// End of input where a function argument was expected.
pub const BAD_FUNCTION_ARGUMENT_EOF: &str = "jql.parse.bad.function.argument.eof";
/// A `)` directly after a `,` in an argument list.
pub const EMPTY_FUNCTION_ARGUMENT: &str = "jql.parse.empty.function.argument";
/// A specific token was expected.
pub const EXPECTED_TEXT: &str = "jql.parse.expected.text";
/// End of input where a specific token was expected.
pub const EXPECTED_TEXT_EOF: &str = "jql.parse.expected.text.eof";
/// One of two specific tokens was expected.
pub const EXPECTED_TEXT_2: &str = "jql.parse.expected.text.2";
/// End of input where one of two specific tokens was expected.
pub const EXPECTED_TEXT_2_EOF: &str = "jql.parse.expected.text.2.eof";
/// Boolean operator with nothing after it.
pub const EXPECTED_CLAUSE: &str = "jql.parse.expected.clause";
/// `ORDER BY` nested in a group or repeated.
pub const ILLEGAL_ORDER_BY: &str = "jql.parse.illegal.order.by";
/// The same history predicate used twice in one clause.
pub const DUPLICATE_PREDICATE: &str = "jql.parse.duplicate.predicate";
/// A history predicate the operator does not accept.
pub const UNSUPPORTED_PREDICATE: &str = "jql.parse.unsupported.predicate";
/// Nesting deeper than the configured maximum.
pub const TOO_COMPLEX: &str = "jql.parse.too.complex";
/// Blank input where a clause is required.
pub const BLANK_INPUT: &str = "jql.parse.blank.input";

/// All keys, in the order listed above.
pub const ALL: &[&str] = &[
    UNKNOWN,
    UNKNOWN_NO_POS,
    RESERVED_WORD,
    RESERVED_WORD_AS_FIELD,
    ILLEGAL_ESCAPE,
    ILLEGAL_ESCAPE_BLANK,
    RESERVED_CHARACTER,
    ILLEGAL_CHARACTER,
    UNFINISHED_STRING,
    UNFINISHED_STRING_BLANK,
    ILLEGAL_NUMBER,
    ILLEGAL_DECIMAL,
    EMPTY_FIELD,
    EMPTY_FUNCTION,
    NO_FIELD,
    NO_FIELD_EOF,
    NO_CF_FIELD,
    NO_ORDER,
    NO_OPERATOR,
    NO_OPERATOR_EOF,
    BAD_CUSTOM_FIELD_ID,
    BAD_CUSTOM_FIELD_ID_EOF,
    BAD_PROPERTY_ID,
    BAD_PROPERTY_ID_EOF,
    LOGICAL_OPERATOR,
    LOGICAL_OPERATOR_EOF,
    BAD_OPERAND,
    BAD_OPERAND_EOF,
    BAD_FUNCTION_ARGUMENT,
    BAD_FUNCTION_ARGUMENT_EOF,
    EMPTY_FUNCTION_ARGUMENT,
    EXPECTED_TEXT,
    EXPECTED_TEXT_EOF,
    EXPECTED_TEXT_2,
    EXPECTED_TEXT_2_EOF,
    EXPECTED_CLAUSE,
    ILLEGAL_ORDER_BY,
    DUPLICATE_PREDICATE,
    UNSUPPORTED_PREDICATE,
    TOO_COMPLEX,
    BLANK_INPUT,
];
