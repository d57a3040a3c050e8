//! JQL parser.
//!
//! Pulls tokens from the [`Lexer`] one at a time and builds a [`Query`] by recursive descent.
//! The first problem aborts the parse.
//!
//! # Grammar
//!
//! ```text
//! query     → [or_expr] [ORDER BY sort ("," sort)*] EOF
//! or_expr   → and_expr (OR and_expr)*
//! and_expr  → not_expr (AND not_expr)*
//! not_expr  → (NOT | "!") not_expr | primary
//! primary   → "(" or_expr ")" | terminal
//! terminal  → field ( cmp_op scalar
//!                   | [NOT] IN list
//!                   | IS [NOT] (EMPTY | NULL)
//!                   | WAS [NOT] [IN] operand predicate*
//!                   | CHANGED predicate* )
//! field     → (name | "cf" "[" integer "]") [property]
//! property  → "[" key "]" [".ref.ref"]
//! scalar    → EMPTY | NULL | literal | function
//! list      → "(" scalar ("," scalar)* ")" | function
//! function  → name "(" [arg ("," arg)*] ")"
//! predicate → (BY | BEFORE | AFTER | ON | FROM | TO) scalar
//!           | DURING "(" scalar "," scalar ")"
//! sort      → field [ASC | DESC]
//! ```
//!
//! # Precedence (highest to lowest)
//!
//! 1. Grouping: `(...)`
//! 2. Negation: `NOT`, `!`
//! 3. `AND`, `&`, `&&`
//! 4. `OR`, `|`, `||`

use rust_decimal::Decimal;

use crate::{
    ast::{
        ChangedClause, Clause, HistoryPredicate, Operand, Operator, OrderBy, PredicateKind,
        Property, Query, SearchSort, SortOrder, TerminalClause, WasClause,
    },
    error::{AstError, JqlParseErrorMessage, JqlParseException},
    lexer::{Keyword, LexFault, Lexer, NumberKind, Position, Punctuation, Symbol, Token, TokenKind},
    strings,
};

/// Result type used throughout the parser.
type ParseResult<T> = Result<T, JqlParseException>;

/// A field reference as written on the left of an operator or in a sort.
struct FieldRef {
    /// Field name; custom fields are canonicalized to `cf[N]`.
    name: String,
    /// Entity property, if one was addressed.
    property: Option<Property>,
}

/// Recursive descent parser over a pull-based lexer.
pub(crate) struct Parser<'a> {
    /// Token source.
    lexer: Lexer<'a>,
    /// End of the last consumed token. End-of-input errors are reported here.
    last_end: Position,
    /// Current nesting depth of groups and negations.
    depth: usize,
    /// Maximum nesting depth.
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `input`.
    pub(crate) fn new(input: &'a str, max_depth: usize) -> Self {
        Self {
            lexer: Lexer::new(input),
            last_end: Position::START,
            depth: 0,
            max_depth,
        }
    }

    /// Parses a complete query, including an optional `ORDER BY`.
    pub(crate) fn parse_query(mut self) -> ParseResult<Query> {
        let clause = match self.peek_kind()? {
            TokenKind::EndOfInput | TokenKind::Keyword(Keyword::Order) => None,
            _ => Some(self.parse_or()?),
        };

        let order_by = match self.peek_kind()? {
            TokenKind::EndOfInput => OrderBy::default(),
            TokenKind::Keyword(Keyword::Order) => self.parse_order_by()?,
            _ => return Err(self.unexpected(JqlParseErrorMessage::need_logical_operator)),
        };

        Ok(Query::new(clause, order_by))
    }

    /// Parses a where-clause alone. `ORDER BY` is rejected.
    pub(crate) fn parse_clause(mut self) -> ParseResult<Clause> {
        let clause = self.parse_or()?;
        match self.peek_kind()? {
            TokenKind::EndOfInput => Ok(clause),
            TokenKind::Keyword(Keyword::Order) => {
                let start = self.lexer.peek().start;
                Err(JqlParseErrorMessage::illegal_order_by(start).into())
            }
            _ => Err(self.unexpected(JqlParseErrorMessage::need_logical_operator)),
        }
    }

    /// Parses: or_expr → and_expr (OR and_expr)*
    fn parse_or(&mut self) -> ParseResult<Clause> {
        let mut children = vec![self.parse_and()?];
        while self.peek_kind()? == TokenKind::Keyword(Keyword::Or) {
            let operator = self.advance();
            self.expect_clause_after(&operator)?;
            children.push(self.parse_and()?);
        }
        self.combine(children, Clause::or)
    }

    /// Parses: and_expr → not_expr (AND not_expr)*
    fn parse_and(&mut self) -> ParseResult<Clause> {
        let mut children = vec![self.parse_not()?];
        while self.peek_kind()? == TokenKind::Keyword(Keyword::And) {
            let operator = self.advance();
            self.expect_clause_after(&operator)?;
            children.push(self.parse_not()?);
        }
        self.combine(children, Clause::and)
    }

    /// Returns the only child, or joins several with `join`.
    fn combine(
        &self,
        mut children: Vec<Clause>,
        join: fn(Vec<Clause>) -> Result<Clause, AstError>,
    ) -> ParseResult<Clause> {
        if children.len() == 1
            && let Some(only) = children.pop()
        {
            return Ok(only);
        }
        join(children).map_err(|e| self.ast_error(e))
    }

    /// Parses: not_expr → (NOT | "!") not_expr | primary
    fn parse_not(&mut self) -> ParseResult<Clause> {
        match self.peek_kind()? {
            TokenKind::Keyword(Keyword::Not) | TokenKind::Operator(Symbol::Bang) => {
                let operator = self.advance();
                self.expect_clause_after(&operator)?;
                let child = self.nested(operator.start, Self::parse_not)?;
                Ok(Clause::not(child))
            }
            _ => self.parse_primary(),
        }
    }

    /// Parses: primary → "(" or_expr ")" | terminal
    fn parse_primary(&mut self) -> ParseResult<Clause> {
        if self.peek_kind()? != TokenKind::Punctuation(Punctuation::LParen) {
            return self.parse_terminal();
        }
        let open = self.advance();
        let inner = self.nested(open.start, Self::parse_or)?;
        if self.peek_kind()? == TokenKind::Keyword(Keyword::Order) {
            let start = self.lexer.peek().start;
            return Err(JqlParseErrorMessage::illegal_order_by(start).into());
        }
        self.expect_punctuation(Punctuation::RParen)?;
        Ok(inner)
    }

    /// Fails with "expected a clause" when nothing usable follows a boolean operator.
    fn expect_clause_after(&mut self, operator: &Token) -> ParseResult<()> {
        match self.peek_kind()? {
            TokenKind::EndOfInput
            | TokenKind::Punctuation(Punctuation::RParen)
            | TokenKind::Keyword(Keyword::And | Keyword::Or | Keyword::Order) => {
                Err(JqlParseErrorMessage::expected_clause(&operator.text, operator.end).into())
            }
            _ => Ok(()),
        }
    }

    /// Runs `parse` one nesting level deeper, enforcing the depth limit.
    fn nested<T>(
        &mut self,
        at: Position,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= self.max_depth {
            return Err(JqlParseErrorMessage::too_complex(self.max_depth, at).into());
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Parses a field, an operator and whatever the operator takes.
    fn parse_terminal(&mut self) -> ParseResult<Clause> {
        let field = self.parse_field()?;
        let operator = self.peek_token()?.clone();

        let clause = match operator.kind {
            TokenKind::Operator(symbol) => {
                let Some(op) = comparison(symbol) else {
                    return Err(self.unexpected(JqlParseErrorMessage::no_operator));
                };
                self.advance();
                let operand = self.parse_scalar()?;
                self.terminal(field, op, operand, &operator)?
            }
            TokenKind::Keyword(Keyword::In) => {
                self.advance();
                let operand = self.parse_list()?;
                self.terminal(field, Operator::In, operand, &operator)?
            }
            TokenKind::Keyword(Keyword::Not) => {
                self.advance();
                self.expect_keyword(Keyword::In)?;
                let operand = self.parse_list()?;
                self.terminal(field, Operator::NotIn, operand, &operator)?
            }
            TokenKind::Keyword(Keyword::Is) => {
                self.advance();
                let negated = self.eat_keyword(Keyword::Not);
                self.parse_emptiness(negated)?;
                let op = if negated { Operator::IsNot } else { Operator::Is };
                self.terminal(field, op, Operand::Empty, &operator)?
            }
            TokenKind::Keyword(Keyword::Was) => {
                self.reject_property(&field, &operator)?;
                self.advance();
                self.parse_was(field.name, &operator)?
            }
            TokenKind::Keyword(Keyword::Changed) => {
                self.reject_property(&field, &operator)?;
                self.advance();
                let predicate = self.parse_predicates(Operator::Changed)?;
                ChangedClause::new(field.name, predicate)
                    .map(Clause::Changed)
                    .map_err(|e| self.ast_error(e))?
            }
            _ => return Err(self.unexpected(JqlParseErrorMessage::no_operator)),
        };
        Ok(clause)
    }

    /// Builds a terminal clause.
    fn terminal(
        &self,
        field: FieldRef,
        operator: Operator,
        operand: Operand,
        at: &Token,
    ) -> ParseResult<Clause> {
        let mut terminal = TerminalClause::new(field.name, operator, operand)
            .map_err(|_| JqlParseErrorMessage::unknown(Some(at.start)))?;
        if let Some(property) = field.property {
            terminal = terminal.with_property(property);
        }
        Ok(Clause::Terminal(terminal))
    }

    /// History clauses do not address entity properties.
    fn reject_property(&self, field: &FieldRef, operator: &Token) -> ParseResult<()> {
        if field.property.is_some() {
            return Err(JqlParseErrorMessage::no_operator(Some(&operator.text), operator.start).into());
        }
        Ok(())
    }

    /// Parses the remainder of `IS [NOT]`: `EMPTY` or `NULL`.
    fn parse_emptiness(&mut self, negated: bool) -> ParseResult<()> {
        match self.peek_kind()? {
            TokenKind::Keyword(Keyword::Empty | Keyword::Null) => {
                self.advance();
                Ok(())
            }
            TokenKind::Operator(_) if !negated => {
                Err(self.unexpected(|found, at| JqlParseErrorMessage::expected_text("NOT", found, at)))
            }
            _ => Err(self.unexpected(JqlParseErrorMessage::bad_operand)),
        }
    }

    /// Parses the remainder of `WAS [NOT] [IN] operand predicate*`.
    fn parse_was(&mut self, field: String, was: &Token) -> ParseResult<Clause> {
        let negated = self.eat_keyword(Keyword::Not);
        let list = self.eat_keyword(Keyword::In);
        let operator = match (negated, list) {
            (false, false) => Operator::Was,
            (true, false) => Operator::WasNot,
            (false, true) => Operator::WasIn,
            (true, true) => Operator::WasNotIn,
        };
        let operand = if list {
            self.parse_list()?
        } else {
            self.parse_scalar()?
        };
        let predicate = self.parse_predicates(operator)?;
        WasClause::new(field, operator, operand, predicate)
            .map(Clause::Was)
            .map_err(|_| JqlParseErrorMessage::unknown(Some(was.start)).into())
    }

    /// Parses zero or more history predicates following a `WAS` or `CHANGED` operator.
    fn parse_predicates(&mut self, operator: Operator) -> ParseResult<Option<HistoryPredicate>> {
        let mut predicates: Vec<HistoryPredicate> = Vec::new();
        let mut first = None;
        loop {
            let kind = match self.peek_kind()? {
                TokenKind::Keyword(keyword) => match predicate_kind(keyword) {
                    Some(kind) => kind,
                    None => break,
                },
                _ => break,
            };
            let keyword = self.advance();
            if first.is_none() {
                first = Some(keyword.start);
            }

            if operator != Operator::Changed && matches!(kind, PredicateKind::From | PredicateKind::To)
            {
                return Err(JqlParseErrorMessage::unsupported_predicate(
                    kind.keyword(),
                    operator.as_str(),
                    keyword.start,
                )
                .into());
            }
            if predicates.iter().any(|p| p.kind() == Some(kind)) {
                return Err(
                    JqlParseErrorMessage::duplicate_predicate(kind.keyword(), keyword.start).into(),
                );
            }

            let predicate = match kind {
                PredicateKind::During => {
                    self.expect_punctuation(Punctuation::LParen)?;
                    let start = self.parse_scalar()?;
                    self.expect_punctuation(Punctuation::Comma)?;
                    let end = self.parse_scalar()?;
                    self.expect_punctuation(Punctuation::RParen)?;
                    HistoryPredicate::During(start, end)
                }
                PredicateKind::By => HistoryPredicate::By(self.parse_scalar()?),
                PredicateKind::Before => HistoryPredicate::Before(self.parse_scalar()?),
                PredicateKind::After => HistoryPredicate::After(self.parse_scalar()?),
                PredicateKind::On => HistoryPredicate::On(self.parse_scalar()?),
                PredicateKind::From => HistoryPredicate::From(self.parse_scalar()?),
                PredicateKind::To => HistoryPredicate::To(self.parse_scalar()?),
            };
            predicates.push(predicate);
        }

        match first {
            None => Ok(None),
            Some(at) => HistoryPredicate::all(predicates)
                .map(Some)
                .map_err(|_| JqlParseErrorMessage::unknown(Some(at)).into()),
        }
    }

    /// Parses a field reference: a name or `cf[N]`, with an optional property.
    fn parse_field(&mut self) -> ParseResult<FieldRef> {
        let token = self.lexer.peek();
        let start = token.start;
        match token.kind {
            TokenKind::Keyword(Keyword::Cf) => {
                self.advance();
                let name = self.parse_custom_field_id()?;
                let property = self.parse_property()?;
                Ok(FieldRef { name, property })
            }
            TokenKind::Keyword(Keyword::Order) => {
                Err(JqlParseErrorMessage::illegal_order_by(start).into())
            }
            TokenKind::Keyword(_) | TokenKind::Invalid(LexFault::ReservedWord) => Err(
                JqlParseErrorMessage::reserved_word_as_field(&token.text, start).into(),
            ),
            TokenKind::Punctuation(Punctuation::LBracket) => {
                Err(JqlParseErrorMessage::no_cf_field(start).into())
            }
            TokenKind::Identifier | TokenKind::QuotedString | TokenKind::Number(_) => {
                let name = self.advance();
                if name.text.trim().is_empty() {
                    return Err(JqlParseErrorMessage::empty_field_name(start).into());
                }
                let property = self.parse_property()?;
                Ok(FieldRef {
                    name: name.text,
                    property,
                })
            }
            _ => Err(self.unexpected(JqlParseErrorMessage::no_field)),
        }
    }

    /// Parses `[N]` after `cf`, returning the canonical field name.
    fn parse_custom_field_id(&mut self) -> ParseResult<String> {
        self.expect_punctuation(Punctuation::LBracket)?;
        let token = self.peek_token()?;
        let id = match token.kind {
            TokenKind::Number(NumberKind::Integer) if !token.text.starts_with('-') => {
                match token.text.parse::<i64>() {
                    Ok(id) => id,
                    Err(_) => {
                        return Err(
                            JqlParseErrorMessage::illegal_number(&token.text, token.start).into(),
                        );
                    }
                }
            }
            _ => return Err(self.unexpected(JqlParseErrorMessage::bad_custom_field_id)),
        };
        self.advance();
        self.expect_punctuation(Punctuation::RBracket)?;
        Ok(strings::custom_field_name(id))
    }

    /// Parses an optional `[key.path].ref.path` after a field name.
    fn parse_property(&mut self) -> ParseResult<Option<Property>> {
        if self.peek_kind()? != TokenKind::Punctuation(Punctuation::LBracket) {
            return Ok(None);
        }
        self.advance();

        let key = match self.peek_kind()? {
            TokenKind::Identifier | TokenKind::QuotedString | TokenKind::Number(_) => {
                self.advance()
            }
            _ => return Err(self.unexpected(JqlParseErrorMessage::bad_property_id)),
        };
        if Property::parse(&key.text, "").is_err() {
            return Err(JqlParseErrorMessage::bad_property_id(Some(&key.text), key.start).into());
        }
        let close = self.expect_punctuation(Punctuation::RBracket)?;

        let references = self.lexer.peek();
        if references.kind == TokenKind::Identifier
            && references.start == close.end
            && let Some(path) = references.text.strip_prefix('.')
        {
            let path = path.to_string();
            let references = self.advance();
            let bad_reference = || -> JqlParseException {
                JqlParseErrorMessage::bad_property_id(Some(&references.text), references.start)
                    .into()
            };
            // A lone "." names no reference at all.
            if path.is_empty() {
                return Err(bad_reference());
            }
            return Property::parse(&key.text, &path).map(Some).map_err(|_| bad_reference());
        }
        Property::parse(&key.text, "")
            .map(Some)
            .map_err(|_| JqlParseErrorMessage::bad_property_id(Some(&key.text), key.start).into())
    }

    /// Parses a single-valued operand: `EMPTY`, a literal or a function call.
    fn parse_scalar(&mut self) -> ParseResult<Operand> {
        match self.peek_kind()? {
            TokenKind::Keyword(Keyword::Empty | Keyword::Null) => {
                self.advance();
                Ok(Operand::Empty)
            }
            TokenKind::Identifier | TokenKind::QuotedString | TokenKind::Number(_) => {
                let word = self.advance();
                if self.peek_kind()? == TokenKind::Punctuation(Punctuation::LParen) {
                    return self.parse_function(word);
                }
                literal(word)
            }
            _ => Err(self.unexpected(JqlParseErrorMessage::bad_operand)),
        }
    }

    /// Parses the operand of an `IN`-family operator: a parenthesized list or a function call.
    fn parse_list(&mut self) -> ParseResult<Operand> {
        match self.peek_kind()? {
            TokenKind::Punctuation(Punctuation::LParen) => {
                self.advance();
                let mut values = vec![self.parse_scalar()?];
                loop {
                    match self.peek_kind()? {
                        TokenKind::Punctuation(Punctuation::Comma) => {
                            self.advance();
                            values.push(self.parse_scalar()?);
                        }
                        TokenKind::Punctuation(Punctuation::RParen) => {
                            let close = self.advance();
                            return Operand::list(values).map_err(|_| {
                                JqlParseErrorMessage::unknown(Some(close.start)).into()
                            });
                        }
                        _ => {
                            return Err(self.unexpected(|found, at| {
                                JqlParseErrorMessage::expected_text2(")", ",", found, at)
                            }));
                        }
                    }
                }
            }
            TokenKind::Identifier | TokenKind::QuotedString | TokenKind::Number(_) => {
                let word = self.advance();
                if self.peek_kind()? == TokenKind::Punctuation(Punctuation::LParen) {
                    return self.parse_function(word);
                }
                Err(JqlParseErrorMessage::bad_operand(Some(&word.text), word.start).into())
            }
            _ => Err(self.unexpected(JqlParseErrorMessage::bad_operand)),
        }
    }

    /// Parses the argument list of a function named by `name`. The next token is `(`.
    fn parse_function(&mut self, name: Token) -> ParseResult<Operand> {
        if name.text.trim().is_empty() {
            return Err(JqlParseErrorMessage::empty_function_name(name.start).into());
        }
        self.advance();

        let mut args = Vec::new();
        match self.peek_kind()? {
            TokenKind::Punctuation(Punctuation::RParen) => {
                self.advance();
                return self.function(name, args);
            }
            TokenKind::EndOfInput => {
                return Err(self.unexpected(|found, at| {
                    JqlParseErrorMessage::expected_text(")", found, at)
                }));
            }
            _ => {}
        }

        loop {
            match self.peek_kind()? {
                TokenKind::Identifier | TokenKind::QuotedString | TokenKind::Number(_) => {
                    args.push(self.advance().text);
                }
                _ => return Err(self.unexpected(JqlParseErrorMessage::bad_function_argument)),
            }
            match self.peek_kind()? {
                TokenKind::Punctuation(Punctuation::RParen) => {
                    self.advance();
                    return self.function(name, args);
                }
                TokenKind::Punctuation(Punctuation::Comma) => {
                    self.advance();
                    if self.peek_kind()? == TokenKind::Punctuation(Punctuation::RParen) {
                        let close = self.lexer.peek().start;
                        return Err(JqlParseErrorMessage::empty_function_argument(close).into());
                    }
                }
                TokenKind::EndOfInput => {
                    return Err(self.unexpected(|found, at| {
                        JqlParseErrorMessage::expected_text(")", found, at)
                    }));
                }
                _ => {
                    return Err(self.unexpected(|found, at| {
                        JqlParseErrorMessage::expected_text2(")", ",", found, at)
                    }));
                }
            }
        }
    }

    /// Builds a function operand.
    fn function(&self, name: Token, args: Vec<String>) -> ParseResult<Operand> {
        Operand::function(name.text, args)
            .map_err(|_| JqlParseErrorMessage::empty_function_name(name.start).into())
    }

    /// Parses `ORDER BY sort ("," sort)*` up to the end of input.
    fn parse_order_by(&mut self) -> ParseResult<OrderBy> {
        self.advance();
        self.expect_keyword(Keyword::By)?;

        let mut sorts = Vec::new();
        loop {
            let field = self.parse_field()?;
            let token = self.peek_token()?;
            let order = match token.kind {
                TokenKind::Keyword(Keyword::Asc) => Some(SortOrder::Asc),
                TokenKind::Keyword(Keyword::Desc) => Some(SortOrder::Desc),
                TokenKind::Identifier
                | TokenKind::QuotedString
                | TokenKind::Number(_)
                | TokenKind::Keyword(
                    Keyword::In
                    | Keyword::Is
                    | Keyword::Not
                    | Keyword::Empty
                    | Keyword::Null
                    | Keyword::By
                    | Keyword::Cf,
                ) => {
                    return Err(
                        JqlParseErrorMessage::bad_sort_order(&token.text, token.start).into(),
                    );
                }
                _ => None,
            };
            if order.is_some() {
                self.advance();
            }
            let mut sort = SearchSort::new(field.name, order.unwrap_or_default())
                .map_err(|e| self.ast_error(e))?;
            if let Some(property) = field.property {
                sort = sort.with_property(property);
            }
            sorts.push(sort);

            match self.peek_kind()? {
                TokenKind::EndOfInput => return Ok(OrderBy::new(sorts)),
                TokenKind::Punctuation(Punctuation::Comma) => {
                    self.advance();
                }
                TokenKind::Keyword(Keyword::Order) => {
                    let start = self.lexer.peek().start;
                    return Err(JqlParseErrorMessage::illegal_order_by(start).into());
                }
                _ => {
                    return Err(self.unexpected(|found, at| {
                        JqlParseErrorMessage::expected_text(",", found, at)
                    }));
                }
            }
        }
    }

    /// Consumes `keyword` or fails with "expected".
    fn expect_keyword(&mut self, keyword: Keyword) -> ParseResult<Token> {
        if self.peek_kind()? == TokenKind::Keyword(keyword) {
            return Ok(self.advance());
        }
        let expected = match keyword {
            Keyword::By => "by",
            other => other.as_str(),
        };
        Err(self.unexpected(|found, at| JqlParseErrorMessage::expected_text(expected, found, at)))
    }

    /// Consumes `keyword` if it is next.
    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.lexer.peek().kind == TokenKind::Keyword(keyword) {
            self.advance();
            return true;
        }
        false
    }

    /// Consumes `punctuation` or fails with "expected".
    fn expect_punctuation(&mut self, punctuation: Punctuation) -> ParseResult<Token> {
        if self.peek_kind()? == TokenKind::Punctuation(punctuation) {
            return Ok(self.advance());
        }
        let expected = match punctuation {
            Punctuation::LParen => "(",
            Punctuation::RParen => ")",
            Punctuation::LBracket => "[",
            Punctuation::RBracket => "]",
            Punctuation::Comma => ",",
        };
        Err(self.unexpected(|found, at| JqlParseErrorMessage::expected_text(expected, found, at)))
    }

    /// Returns the next token, failing if it is malformed.
    fn peek_token(&mut self) -> ParseResult<&Token> {
        let token = self.lexer.peek();
        if let TokenKind::Invalid(fault) = token.kind {
            return Err(lexical_error(fault, token).into());
        }
        Ok(token)
    }

    /// Returns the kind of the next token, failing if it is malformed.
    fn peek_kind(&mut self) -> ParseResult<TokenKind> {
        self.peek_token().map(|t| t.kind)
    }

    /// Consumes the next token.
    fn advance(&mut self) -> Token {
        let token = self.lexer.next_token();
        if !token.is_eof() {
            self.last_end = token.end;
        }
        token
    }

    /// Builds an error about the next token. End of input is reported after the last token.
    fn unexpected(
        &mut self,
        build: impl FnOnce(Option<&str>, Position) -> JqlParseErrorMessage,
    ) -> JqlParseException {
        let last_end = self.last_end;
        match self.peek_token() {
            Ok(token) if token.is_eof() => build(None, last_end).into(),
            Ok(token) => build(Some(&token.text), token.start).into(),
            Err(lexical) => lexical,
        }
    }

    /// Reports an AST construction failure at the last consumed token.
    fn ast_error(&self, _: AstError) -> JqlParseException {
        JqlParseErrorMessage::unknown(Some(self.last_end)).into()
    }
}

/// Maps a symbolic operator token to its clause operator. `!` is not a comparison.
fn comparison(symbol: Symbol) -> Option<Operator> {
    let operator = match symbol {
        Symbol::Equals => Operator::Equals,
        Symbol::NotEquals => Operator::NotEquals,
        Symbol::Like => Operator::Like,
        Symbol::NotLike => Operator::NotLike,
        Symbol::LessThan => Operator::LessThan,
        Symbol::LessThanEquals => Operator::LessThanEquals,
        Symbol::GreaterThan => Operator::GreaterThan,
        Symbol::GreaterThanEquals => Operator::GreaterThanEquals,
        Symbol::Bang => return None,
    };
    Some(operator)
}

/// History predicate introduced by `keyword`, if any.
fn predicate_kind(keyword: Keyword) -> Option<PredicateKind> {
    let kind = match keyword {
        Keyword::By => PredicateKind::By,
        Keyword::During => PredicateKind::During,
        Keyword::Before => PredicateKind::Before,
        Keyword::After => PredicateKind::After,
        Keyword::On => PredicateKind::On,
        Keyword::From => PredicateKind::From,
        Keyword::To => PredicateKind::To,
        _ => return None,
    };
    Some(kind)
}

/// Converts a word token into a literal operand.
fn literal(token: Token) -> ParseResult<Operand> {
    match token.kind {
        TokenKind::Number(NumberKind::Integer) => token
            .text
            .parse::<i64>()
            .map(Operand::integer)
            .map_err(|_| JqlParseErrorMessage::illegal_number(&token.text, token.start).into()),
        TokenKind::Number(NumberKind::Decimal) => Decimal::from_str_exact(&token.text)
            .map(Operand::decimal)
            .map_err(|_| JqlParseErrorMessage::illegal_decimal(&token.text, token.start).into()),
        _ => Ok(Operand::string(token.text)),
    }
}

/// Diagnostic for an invalid token.
fn lexical_error(fault: LexFault, token: &Token) -> JqlParseErrorMessage {
    match fault {
        LexFault::UnterminatedString => {
            JqlParseErrorMessage::unfinished_string(&token.text, token.start)
        }
        LexFault::IllegalEscape => JqlParseErrorMessage::illegal_escape(&token.text, token.start),
        LexFault::IllegalCharacter(c) => JqlParseErrorMessage::illegal_character(c, token.start),
        LexFault::ReservedCharacter(c) => JqlParseErrorMessage::reserved_character(c, token.start),
        LexFault::ReservedWord => JqlParseErrorMessage::reserved_word(&token.text, token.start),
    }
}
