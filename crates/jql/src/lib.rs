//! jql: a command-line front end for JQL issue-search queries.
//!
//! The binary parses queries into their canonical text, tree or JSON form, reports syntax errors
//! with a caret under the offending column, checks field and function names against the
//! configured registries, and manages `.jql.toml` configuration files.

#![warn(missing_docs)]

pub mod cli;
