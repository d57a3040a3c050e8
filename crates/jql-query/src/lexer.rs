//! JQL lexer (tokenizer).
//!
//! Converts a query string into tokens on demand. The lexer never fails: malformed input is
//! returned as a [`TokenKind::Invalid`] token and the parser turns it into a diagnostic.

use std::{fmt, iter::Peekable, str::Chars};

use crate::strings;

/// A location in the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Character offset within the line, starting at 0.
    pub column: usize,
}

impl Position {
    /// Start of the input.
    pub const START: Self = Self { line: 1, column: 0 };
}

/// Grammar keywords. Matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `AND`, `&`, `&&`.
    And,
    /// `OR`, `|`, `||`.
    Or,
    /// `NOT`.
    Not,
    /// `IN`.
    In,
    /// `IS`.
    Is,
    /// `EMPTY`.
    Empty,
    /// `NULL`.
    Null,
    /// `ORDER`.
    Order,
    /// `BY`.
    By,
    /// `ASC`.
    Asc,
    /// `DESC`.
    Desc,
    /// `WAS`.
    Was,
    /// `CHANGED`.
    Changed,
    /// `DURING`.
    During,
    /// `BEFORE`.
    Before,
    /// `AFTER`.
    After,
    /// `ON`.
    On,
    /// `FROM`.
    From,
    /// `TO`.
    To,
    /// The `cf` custom field prefix.
    Cf,
}

impl Keyword {
    /// Looks up an unquoted word.
    pub fn from_word(word: &str) -> Option<Self> {
        let keyword = match word.to_ascii_lowercase().as_str() {
            "and" => Self::And,
            "or" => Self::Or,
            "not" => Self::Not,
            "in" => Self::In,
            "is" => Self::Is,
            "empty" => Self::Empty,
            "null" => Self::Null,
            "order" => Self::Order,
            "by" => Self::By,
            "asc" => Self::Asc,
            "desc" => Self::Desc,
            "was" => Self::Was,
            "changed" => Self::Changed,
            "during" => Self::During,
            "before" => Self::Before,
            "after" => Self::After,
            "on" => Self::On,
            "from" => Self::From,
            "to" => Self::To,
            "cf" => Self::Cf,
            _ => return None,
        };
        Some(keyword)
    }

    /// Canonical spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::In => "IN",
            Self::Is => "IS",
            Self::Empty => "EMPTY",
            Self::Null => "NULL",
            Self::Order => "ORDER",
            Self::By => "BY",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Was => "WAS",
            Self::Changed => "CHANGED",
            Self::During => "DURING",
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::On => "ON",
            Self::From => "FROM",
            Self::To => "TO",
            Self::Cf => "cf",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Symbolic comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// `=`
    Equals,
    /// `!=`
    NotEquals,
    /// `~`
    Like,
    /// `!~`
    NotLike,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEquals,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEquals,
    /// `!`, the symbolic `NOT` clause prefix.
    Bang,
}

/// Punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punctuation {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
}

/// Numeric literal shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// `-?[0-9]+`, of any magnitude.
    Integer,
    /// `-?[0-9]+.[0-9]+`
    Decimal,
}

/// Lexical faults carried by [`TokenKind::Invalid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexFault {
    /// A quote without its closing quote. The token text is the content read so far.
    UnterminatedString,
    /// A backslash escape that is not recognized. The token text is the escape.
    IllegalEscape,
    /// A control character or Unicode non-character.
    IllegalCharacter(char),
    /// A character reserved for future use.
    ReservedCharacter(char),
    /// An unquoted reserved word that the grammar does not use.
    ReservedWord,
}

/// Token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An unquoted word.
    Identifier,
    /// A single- or double-quoted string.
    QuotedString,
    /// An unquoted, escape-free number.
    Number(NumberKind),
    /// A comparison operator or `!`.
    Operator(Symbol),
    /// A grammar keyword.
    Keyword(Keyword),
    /// Brackets, parentheses and commas.
    Punctuation(Punctuation),
    /// End of input. Returned forever once reached.
    EndOfInput,
    /// Malformed input.
    Invalid(LexFault),
}

/// A classified lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Classification.
    pub kind: TokenKind,
    /// Logical text: escapes resolved, quotes removed.
    pub text: String,
    /// Position of the first character.
    pub start: Position,
    /// Position just past the last character.
    pub end: Position,
}

impl Token {
    /// Returns true for the end-of-input token.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }

    /// Returns true when the token is the given keyword.
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    /// Returns true when the token is the given punctuation.
    pub fn is_punctuation(&self, punctuation: Punctuation) -> bool {
        self.kind == TokenKind::Punctuation(punctuation)
    }

    /// Returns true for tokens that can name a field, function or value.
    pub fn is_word(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Identifier | TokenKind::QuotedString | TokenKind::Number(_)
        )
    }
}

/// Result of reading one escape sequence.
enum Escape {
    /// The escaped character.
    Char(char),
    /// The escape was malformed; the payload is the text read.
    Invalid(String),
}

/// Pull-based tokenizer with one token of lookahead.
pub struct Lexer<'a> {
    /// Remaining characters.
    chars: Peekable<Chars<'a>>,
    /// Position of the next unread character.
    position: Position,
    /// Token produced by `peek` and not yet consumed.
    peeked: Option<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: Position::START,
            peeked: None,
        }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> &Token {
        self.peeked.get_or_insert_with(|| {
            let mut scanner = Scanner {
                chars: &mut self.chars,
                position: &mut self.position,
            };
            scanner.scan()
        })
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> Token {
        match self.peeked.take() {
            Some(token) => token,
            None => Scanner {
                chars: &mut self.chars,
                position: &mut self.position,
            }
            .scan(),
        }
    }
}

/// Character-level scanning state borrowed from a [`Lexer`].
struct Scanner<'l, 'a> {
    /// Remaining characters.
    chars: &'l mut Peekable<Chars<'a>>,
    /// Position of the next unread character.
    position: &'l mut Position,
}

impl Scanner<'_, '_> {
    /// Scans one token.
    fn scan(&mut self) -> Token {
        self.skip_whitespace();
        let start = *self.position;

        let Some(&ch) = self.chars.peek() else {
            return self.token(TokenKind::EndOfInput, String::new(), start);
        };

        match ch {
            '"' | '\'' => self.read_quoted(ch),
            '(' => self.punctuation(Punctuation::LParen, ch),
            ')' => self.punctuation(Punctuation::RParen, ch),
            '[' => self.punctuation(Punctuation::LBracket, ch),
            ']' => self.punctuation(Punctuation::RBracket, ch),
            ',' => self.punctuation(Punctuation::Comma, ch),
            '=' => {
                self.advance();
                self.token(TokenKind::Operator(Symbol::Equals), "=".into(), start)
            }
            '~' => {
                self.advance();
                self.token(TokenKind::Operator(Symbol::Like), "~".into(), start)
            }
            '!' => self.read_bang(),
            '<' => self.read_comparison('<', Symbol::LessThan, Symbol::LessThanEquals),
            '>' => self.read_comparison('>', Symbol::GreaterThan, Symbol::GreaterThanEquals),
            '&' => self.read_doubled('&', Keyword::And),
            '|' => self.read_doubled('|', Keyword::Or),
            c if strings::is_illegal_char(c) => {
                self.advance();
                self.token(
                    TokenKind::Invalid(LexFault::IllegalCharacter(c)),
                    c.to_string(),
                    start,
                )
            }
            c if strings::is_reserved_char(c) => {
                self.advance();
                self.token(
                    TokenKind::Invalid(LexFault::ReservedCharacter(c)),
                    c.to_string(),
                    start,
                )
            }
            _ => self.read_word(),
        }
    }

    /// Builds a token ending at the current position.
    fn token(&self, kind: TokenKind, text: String, start: Position) -> Token {
        Token {
            kind,
            text,
            start,
            end: *self.position,
        }
    }

    /// Consumes a single punctuation character.
    fn punctuation(&mut self, punctuation: Punctuation, ch: char) -> Token {
        let start = *self.position;
        self.advance();
        self.token(TokenKind::Punctuation(punctuation), ch.to_string(), start)
    }

    /// Reads `!`, `!=` or `!~`.
    fn read_bang(&mut self) -> Token {
        let start = *self.position;
        self.advance();
        let (symbol, text) = match self.chars.peek() {
            Some('=') => (Symbol::NotEquals, "!="),
            Some('~') => (Symbol::NotLike, "!~"),
            _ => return self.token(TokenKind::Operator(Symbol::Bang), "!".into(), start),
        };
        self.advance();
        self.token(TokenKind::Operator(symbol), text.into(), start)
    }

    /// Reads `<`/`<=` or `>`/`>=`.
    fn read_comparison(&mut self, ch: char, plain: Symbol, with_equals: Symbol) -> Token {
        let start = *self.position;
        self.advance();
        if self.chars.peek() == Some(&'=') {
            self.advance();
            return self.token(TokenKind::Operator(with_equals), format!("{ch}="), start);
        }
        self.token(TokenKind::Operator(plain), ch.to_string(), start)
    }

    /// Reads `&`/`&&` or `|`/`||`.
    fn read_doubled(&mut self, ch: char, keyword: Keyword) -> Token {
        let start = *self.position;
        self.advance();
        let mut text = ch.to_string();
        if self.chars.peek() == Some(&ch) {
            self.advance();
            text.push(ch);
        }
        self.token(TokenKind::Keyword(keyword), text, start)
    }

    /// Reads a quoted string. `quote` is the opening quote character.
    fn read_quoted(&mut self, quote: char) -> Token {
        let start = *self.position;
        self.advance();

        let mut content = String::new();
        loop {
            let here = *self.position;
            match self.chars.peek().copied() {
                None => {
                    return self.token(
                        TokenKind::Invalid(LexFault::UnterminatedString),
                        content,
                        start,
                    );
                }
                Some(c) if c == quote => {
                    self.advance();
                    return self.token(TokenKind::QuotedString, content, start);
                }
                Some('\\') => match self.read_escape() {
                    Escape::Char(c) => content.push(c),
                    Escape::Invalid(text) => {
                        return self.token(TokenKind::Invalid(LexFault::IllegalEscape), text, here);
                    }
                },
                Some(c) if c == '\t' || strings::is_illegal_char(c) => {
                    self.advance();
                    return self.token(
                        TokenKind::Invalid(LexFault::IllegalCharacter(c)),
                        c.to_string(),
                        here,
                    );
                }
                Some(c) => {
                    content.push(c);
                    self.advance();
                }
            }
        }
    }

    /// Reads an unquoted word: identifier, number, keyword or reserved word.
    fn read_word(&mut self) -> Token {
        let start = *self.position;
        let mut word = String::new();
        let mut escaped = false;

        loop {
            let here = *self.position;
            match self.chars.peek().copied() {
                Some('\\') => {
                    escaped = true;
                    match self.read_escape() {
                        Escape::Char(c) => word.push(c),
                        Escape::Invalid(text) => {
                            return self.token(
                                TokenKind::Invalid(LexFault::IllegalEscape),
                                text,
                                here,
                            );
                        }
                    }
                }
                Some(c) if strings::is_word_char(c) => {
                    word.push(c);
                    self.advance();
                }
                _ => break,
            }
        }

        if escaped {
            return self.token(TokenKind::Identifier, word, start);
        }
        if let Some(kind) = strings::number_kind(&word) {
            return self.token(TokenKind::Number(kind), word, start);
        }
        if let Some(keyword) = Keyword::from_word(&word) {
            return self.token(TokenKind::Keyword(keyword), word, start);
        }
        if strings::is_reserved_word(&word) {
            return self.token(TokenKind::Invalid(LexFault::ReservedWord), word, start);
        }
        self.token(TokenKind::Identifier, word, start)
    }

    /// Reads a backslash escape. The current character is the backslash.
    fn read_escape(&mut self) -> Escape {
        self.advance();
        let Some(c) = self.chars.peek().copied() else {
            return Escape::Invalid(String::new());
        };
        self.advance();
        let resolved = match c {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            '"' | '\'' | '\\' | ' ' => c,
            'u' => return self.read_unicode_escape(),
            other => return Escape::Invalid(format!("\\{other}")),
        };
        Escape::Char(resolved)
    }

    /// Reads the four hex digits of a `\u` escape.
    fn read_unicode_escape(&mut self) -> Escape {
        let mut text = String::from("\\u");
        let mut value = 0u32;
        for _ in 0..4 {
            let Some(c) = self.chars.peek().copied() else {
                return Escape::Invalid(text);
            };
            self.advance();
            text.push(c);
            match c.to_digit(16) {
                Some(digit) => value = value * 16 + digit,
                None => return Escape::Invalid(text),
            }
        }
        match char::from_u32(value) {
            Some(c) => Escape::Char(c),
            None => Escape::Invalid(text),
        }
    }

    /// Skips whitespace.
    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if strings::is_whitespace(ch) {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Consumes one character, tracking line and column.
    fn advance(&mut self) {
        if let Some(ch) = self.chars.next() {
            if ch == '\n' {
                self.position.line += 1;
                self.position.column = 0;
            } else {
                self.position.column += 1;
            }
        }
    }
}

/// Tokenizes the whole input. The final token is always [`TokenKind::EndOfInput`].
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.is_eof();
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
