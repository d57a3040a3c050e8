//! Lexer, parser, AST and validation for JQL issue-search queries.
//!
//! JQL is a small SQL-like language:
//!
//! - **Comparisons**: `priority >= 3`, `summary ~ crash`
//! - **Membership**: `status IN (Open, "In Progress")`, `assignee NOT IN membersOf(devs)`
//! - **Emptiness**: `fixVersion IS EMPTY`
//! - **History**: `status WAS Open BY admin`, `assignee CHANGED FROM bob TO alice`
//! - **Boolean logic**: `AND`, `OR`, `NOT`, grouping with `(...)`
//! - **Sorting**: `ORDER BY priority DESC, key`
//!
//! Errors are [`JqlParseException`]s wrapping a positioned, translatable
//! [`JqlParseErrorMessage`]. Rendering them needs a [`Translator`]; the built-in [`Catalog`]
//! carries English defaults.
//!
//! # Example
//!
//! ```
//! use jql_query::parse;
//!
//! let query = parse("project = HSP AND status != Closed ORDER BY priority DESC").unwrap();
//! assert_eq!(
//!     query.to_string(),
//!     "project = HSP AND status != Closed ORDER BY priority DESC"
//! );
//!
//! let error = parse("project = HSP AND").unwrap_err();
//! assert_eq!(error.message().key(), "jql.parse.expected.clause");
//! assert_eq!(error.column(), Some(18));
//! ```

#![warn(missing_docs)]

mod ast;
mod error;
pub mod keys;
mod lexer;
pub mod messages;
mod parser;
mod query_parser;
mod resolver;
pub mod strings;
mod validator;

pub use ast::{
    AndClause, ChangedClause, Clause, FunctionOperand, HistoryPredicate, Literal,
    MultiValueOperand, NotClause, Operand, Operator, OrClause, OrderBy, PredicateGroup,
    PredicateKind, Property, Query, SearchSort, SortOrder, TerminalClause, TreeView, WasClause,
};
pub use error::{AstError, JqlParseErrorMessage, JqlParseException};
pub use lexer::{
    Keyword, LexFault, Lexer, NumberKind, Position, Punctuation, Symbol, Token, TokenKind,
    tokenize,
};
pub use messages::{Catalog, ENGLISH, Translator};
pub use query_parser::{DEFAULT_MAX_DEPTH, JqlQueryParser, MAX_DEPTH_LIMIT, ParserOptions};
pub use resolver::{FieldResolver, FunctionResolver, StaticFieldResolver, StaticFunctionResolver};
pub use validator::{JqlValidator, ValidationIssue};

/// Parses a query with default options.
pub fn parse(input: &str) -> Result<Query, JqlParseException> {
    JqlQueryParser::default().parse_query(input)
}
