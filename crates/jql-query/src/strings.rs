//! Character classes, reserved words and quoting for JQL text.

use crate::lexer::{Keyword, NumberKind};

/// Words reserved for future use. Unquoted, they are rejected by the lexer.
///
/// Sorted, lowercase.
pub const RESERVED_WORDS: &[&str] = &[
    "abort", "access", "add", "after", "alias", "all", "alter", "and", "any", "as", "asc",
    "audit", "avg", "before", "begin", "between", "boolean", "break", "by", "byte", "catch",
    "cf", "char", "character", "check", "checkpoint", "collate", "collation", "column",
    "commit", "connect", "continue", "count", "create", "current", "date", "decimal",
    "declare", "decrement", "default", "defaults", "define", "delete", "delimiter", "desc",
    "difference", "distinct", "divide", "do", "double", "drop", "else", "empty", "encoding",
    "end", "equals", "escape", "exclusive", "exec", "execute", "exists", "explain", "false",
    "fetch", "field", "file", "first", "float", "for", "from", "function", "go", "goto",
    "grant", "greater", "group", "having", "identified", "if", "immediate", "in", "increment",
    "index", "initial", "inner", "inout", "input", "insert", "int", "integer", "intersect",
    "intersection", "into", "is", "isempty", "isnull", "join", "last", "left", "less", "like",
    "limit", "lock", "long", "max", "min", "minus", "mode", "modify", "modulo", "more",
    "multiply", "next", "noaudit", "not", "notin", "nowait", "null", "number", "object", "of",
    "on", "option", "or", "order", "outer", "output", "power", "previous", "prior",
    "privileges", "public", "raise", "raw", "remainder", "rename", "resource", "return",
    "returns", "revoke", "right", "row", "rowid", "rownum", "rows", "select", "session", "set",
    "share", "size", "sqrt", "start", "strict", "string", "subtract", "sum", "synonym",
    "table", "then", "to", "trans", "transaction", "trigger", "true", "uid", "union",
    "unique", "update", "user", "validate", "values", "view", "when", "whenever", "where",
    "while", "with",
];

/// Characters reserved for future use outside quotes.
const RESERVED_CHARS: &[char] = &['{', '}', '*', '/', '%', '+', '$', '#', '@', '?', ';', '^'];

/// Characters with grammatical meaning that end an unquoted word.
const SPECIAL_CHARS: &[char] = &['=', '!', '<', '>', '~', '(', ')', '[', ']', ',', '&', '|'];

/// Returns true if `word` is reserved, ignoring case.
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS
        .binary_search(&word.to_lowercase().as_str())
        .is_ok()
}

/// Returns true for characters reserved outside quotes.
pub fn is_reserved_char(c: char) -> bool {
    RESERVED_CHARS.contains(&c)
}

/// Returns true for JQL whitespace. Form feeds and other separators are not whitespace.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Returns true for characters that may not appear anywhere in a query.
///
/// Whitespace control characters are excluded; tabs are separately rejected inside quotes.
pub fn is_illegal_char(c: char) -> bool {
    if is_whitespace(c) {
        return false;
    }
    matches!(c,
        '\u{0}'..='\u{1f}' | '\u{7f}'..='\u{9f}' | '\u{fdd0}'..='\u{fdef}' | '\u{fffe}' | '\u{ffff}')
}

/// Returns true for characters that may appear in an unquoted word without escaping.
pub fn is_word_char(c: char) -> bool {
    !(is_whitespace(c)
        || is_illegal_char(c)
        || is_reserved_char(c)
        || SPECIAL_CHARS.contains(&c)
        || matches!(c, '"' | '\'' | '\\'))
}

/// Classifies an unquoted word as a number, if it is one.
pub fn number_kind(word: &str) -> Option<NumberKind> {
    let digits = word.strip_prefix('-').unwrap_or(word);
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match digits.split_once('.') {
        None if all_digits(digits) => Some(NumberKind::Integer),
        Some((whole, fraction)) if all_digits(whole) && all_digits(fraction) => {
            Some(NumberKind::Decimal)
        }
        _ => None,
    }
}

/// Returns true if `text` cannot be written as a bare word and still read back as `text`.
///
/// Words that would lex as numbers are not quoted here; see [`needs_value_quoting`].
pub fn needs_quoting(text: &str) -> bool {
    text.is_empty()
        || !text.chars().all(is_word_char)
        || Keyword::from_word(text).is_some()
        || is_reserved_word(text)
}

/// Like [`needs_quoting`], but also quotes text that would read back as a number.
pub fn needs_value_quoting(text: &str) -> bool {
    needs_quoting(text) || number_kind(text).is_some()
}

/// Wraps `text` in double quotes, escaping as needed.
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if is_illegal_char(c) => quoted.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Encodes a string literal so it reads back as the same string.
pub fn encode_value(text: &str) -> String {
    if needs_value_quoting(text) {
        quote(text)
    } else {
        text.to_string()
    }
}

/// Encodes a field name. Canonical custom field references are kept bare.
pub fn encode_field(text: &str) -> String {
    if custom_field_id(text).is_some_and(|id| text == custom_field_name(id)) {
        return text.to_string();
    }
    encode_word(text)
}

/// Encodes a function name, argument or property key, quoting only when required.
pub fn encode_word(text: &str) -> String {
    if needs_quoting(text) {
        quote(text)
    } else {
        text.to_string()
    }
}

/// Canonical name for a custom field id.
pub fn custom_field_name(id: i64) -> String {
    format!("cf[{id}]")
}

/// Parses a custom field reference such as `cf[10010]` or `CF [ 10010 ]`.
///
/// The id must be a non-negative integer that fits in an `i64`.
pub fn custom_field_id(text: &str) -> Option<i64> {
    let prefix = text.get(..2)?;
    if !prefix.eq_ignore_ascii_case("cf") {
        return None;
    }
    let inner = text[2..]
        .trim_start_matches(is_whitespace)
        .strip_prefix('[')?
        .trim_end_matches(is_whitespace)
        .strip_suffix(']')?
        .trim_matches(is_whitespace);
    if inner.is_empty() || !inner.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    inner.parse().ok()
}

/// Human-readable form of a character for diagnostics.
pub fn char_display(c: char) -> String {
    if c == '\t' {
        "TAB".to_string()
    } else if is_illegal_char(c) || c.is_whitespace() {
        format!("U+{:04X}", u32::from(c))
    } else {
        c.to_string()
    }
}

/// Escaped form of a character for diagnostics.
pub fn char_escape(c: char) -> String {
    match c {
        '\t' => "\\t".to_string(),
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\u{8}' => "\\b".to_string(),
        '\u{c}' => "\\f".to_string(),
        c => format!("\\u{:04x}", u32::from(c)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_words_are_sorted() {
        let mut sorted = RESERVED_WORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, RESERVED_WORDS);
    }

    #[test]
    fn reserved_word_lookup_ignores_case() {
        assert!(is_reserved_word("select"));
        assert!(is_reserved_word("SELECT"));
        assert!(!is_reserved_word("status"));
    }

    #[test]
    fn every_reserved_word_is_found() {
        let missed: Vec<&str> = RESERVED_WORDS
            .iter()
            .copied()
            .filter(|w| !is_reserved_word(w))
            .collect();
        assert!(missed.is_empty(), "{missed:?}");
    }

    #[test]
    fn number_classification() {
        assert_eq!(number_kind("0"), Some(NumberKind::Integer));
        assert_eq!(number_kind("-29202"), Some(NumberKind::Integer));
        assert_eq!(number_kind("3.14"), Some(NumberKind::Decimal));
        assert_eq!(number_kind("-"), None);
        assert_eq!(number_kind("1-1"), None);
        assert_eq!(number_kind(".5"), None);
        assert_eq!(number_kind("5."), None);
        assert_eq!(number_kind("1.2.3"), None);
        assert_eq!(number_kind("--1"), None);
    }

    #[test]
    fn quoting_decisions() {
        assert!(!needs_quoting("status"));
        assert!(!needs_quoting("one-1"));
        assert!(needs_quoting(""));
        assert!(needs_quoting("two words"));
        assert!(needs_quoting("and"));
        assert!(needs_quoting("was"));
        assert!(needs_quoting("select"));
        assert!(needs_quoting("field"));
        assert!(needs_quoting("File"));
        assert!(needs_quoting("a=b"));
        assert!(needs_quoting("it's"));
        assert!(needs_quoting("50%"));
        assert!(!needs_quoting("123"));
        assert!(needs_value_quoting("123"));
        assert!(needs_value_quoting("-1.5"));
    }

    #[test]
    fn quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), r#""say \"hi\"""#);
        assert_eq!(quote("a\\b"), r#""a\\b""#);
        assert_eq!(quote("tab\there"), r#""tab\there""#);
        assert_eq!(quote("line\nbreak"), r#""line\nbreak""#);
        assert_eq!(quote("\u{7f}"), r#""\u007f""#);
    }

    #[test]
    fn encode_keeps_simple_values() {
        assert_eq!(encode_value("Open"), "Open");
        assert_eq!(encode_value("12"), "\"12\"");
        assert_eq!(encode_value("In Progress"), "\"In Progress\"");
        assert_eq!(encode_field("cf[10010]"), "cf[10010]");
        assert_eq!(encode_field("cf[010]"), "\"cf[010]\"");
        assert_eq!(encode_field("10245948"), "10245948");
        assert_eq!(encode_word("cf[10010]"), "\"cf[10010]\"");
        assert_eq!(encode_word("-65784"), "-65784");
    }

    #[test]
    fn custom_field_references() {
        assert_eq!(custom_field_id("cf[4784]"), Some(4784));
        assert_eq!(custom_field_id("cf [4784]"), Some(4784));
        assert_eq!(custom_field_id("CF[000001]"), Some(1));
        assert_eq!(custom_field_id("Cf  [ 0005 ]"), Some(5));
        assert_eq!(custom_field_id("cf[ 38"), None);
        assert_eq!(custom_field_id("cf[aaa]"), None);
        assert_eq!(custom_field_id("cf[-1232]"), None);
        assert_eq!(custom_field_id("cf[]"), None);
        assert_eq!(custom_field_id("cf[99999999999999999999]"), None);
        assert_eq!(custom_field_id("c"), None);
    }

    #[test]
    fn character_descriptions() {
        assert_eq!(char_display('a'), "a");
        assert_eq!(char_escape('a'), "\\u0061");
        assert_eq!(char_display('\n'), "U+000A");
        assert_eq!(char_escape('\n'), "\\n");
        assert_eq!(char_display('\t'), "TAB");
        assert_eq!(char_escape('\t'), "\\t");
        assert_eq!(char_display('\u{ffff}'), "U+FFFF");
        assert_eq!(char_escape('\u{ffff}'), "\\uffff");
        assert_eq!(char_escape('\u{8}'), "\\b");
        assert_eq!(char_display('\u{c}'), "U+000C");
    }
}
