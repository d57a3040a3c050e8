//! Syntax highlighting and terminal colors for jql.
//!
//! TOML configuration is highlighted with syntect. Queries are colored from the jql lexer's own
//! tokens, so the colors always agree with how the parser reads the text.

#![warn(missing_docs)]

use jql_query::{Keyword, Position, Punctuation, Token, TokenKind, tokenize};
use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// Highlights configuration files for terminal output.
pub struct Highlighter {
    /// Language definitions, including TOML.
    syntax_set: SyntaxSet,
    /// Color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// Active theme.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter using the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML content. Lines syntect cannot handle are passed through unstyled.
    pub fn highlight_toml(&self, content: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension("toml")
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, self.theme_set.get(self.theme));

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Blue text (for keywords).
    pub const BLUE: &str = "\x1b[34m";
    /// Magenta text (for operators).
    pub const MAGENTA: &str = "\x1b[35m";
    /// Cyan text (for headers and numbers).
    pub const CYAN: &str = "\x1b[36m";
    /// Green text (for success and strings).
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text (for warnings and functions).
    pub const YELLOW: &str = "\x1b[33m";
    /// Red text (for errors).
    pub const RED: &str = "\x1b[31m";
    /// Dim/gray text.
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps `text` in `codes` and a reset.
fn paint(codes: &[&str], text: &str) -> String {
    format!("{}{text}{}", codes.concat(), colors::RESET)
}

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    paint(&[colors::BOLD, colors::CYAN], text)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    paint(&[colors::DIM], text)
}

/// Formats text as a success message (green).
pub fn success(text: &str) -> String {
    paint(&[colors::GREEN], text)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    paint(&[colors::YELLOW], text)
}

/// Formats text as an error (red).
pub fn error(text: &str) -> String {
    paint(&[colors::RED], text)
}

/// Indents every line of `content` by four spaces.
pub fn indent_content(content: &str) -> String {
    content
        .lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Colors a parse error rendered with context: the message line red, the caret line bold red.
pub fn error_context(rendered: &str) -> String {
    let lines: Vec<&str> = rendered.lines().collect();
    let last = lines.len().saturating_sub(1);
    let mut output = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            output.push_str(&error(line));
        } else if i == last && line.trim_start().starts_with('^') {
            output.push_str(&paint(&[colors::BOLD, colors::RED], line));
        } else {
            output.push_str(line);
        }
        output.push('\n');
    }
    output
}

/// Token colors for [`highlight_query`].
fn token_style(token: &Token, next: Option<&Token>) -> &'static [&'static str] {
    match token.kind {
        TokenKind::Keyword(Keyword::And | Keyword::Or | Keyword::Not | Keyword::Order) => {
            &[colors::BOLD, colors::BLUE]
        }
        TokenKind::Keyword(_) => &[colors::BLUE],
        TokenKind::Operator(_) => &[colors::MAGENTA],
        TokenKind::QuotedString => &[colors::GREEN],
        TokenKind::Number(_) => &[colors::CYAN],
        TokenKind::Identifier
            if next.is_some_and(|n| n.is_punctuation(Punctuation::LParen) && n.start == token.end) =>
        {
            &[colors::YELLOW]
        }
        TokenKind::Punctuation(_) => &[colors::DIM],
        TokenKind::Invalid(_) => &[colors::BOLD, colors::RED],
        TokenKind::Identifier | TokenKind::EndOfInput => &[],
    }
}

/// Byte offset of a lexer position. Positions past the end clamp to the input length.
fn byte_offset(input: &str, position: Position) -> usize {
    let line_start = input
        .split_inclusive('\n')
        .take(position.line.saturating_sub(1))
        .map(str::len)
        .sum::<usize>();
    input[line_start..]
        .char_indices()
        .nth(position.column)
        .map_or(input.len(), |(offset, _)| line_start + offset)
}

/// Colors a query by token class, preserving the original spelling and whitespace.
///
/// Everything after a malformed token is shown in the error style.
pub fn highlight_query(query: &str) -> String {
    let tokens = tokenize(query);
    let mut output = String::new();
    let mut cursor = 0;

    for (i, token) in tokens.iter().enumerate() {
        if token.is_eof() {
            break;
        }
        let start = byte_offset(query, token.start).max(cursor);
        let end = byte_offset(query, token.end).max(start);
        output.push_str(&query[cursor..start]);
        if matches!(token.kind, TokenKind::Invalid(_)) {
            output.push_str(&error(&query[start..]));
            return output;
        }
        let codes = token_style(token, tokens.get(i + 1));
        if codes.is_empty() {
            output.push_str(&query[start..end]);
        } else {
            output.push_str(&paint(codes, &query[start..end]));
        }
        cursor = end;
    }
    output.push_str(&query[cursor..]);
    output
}
