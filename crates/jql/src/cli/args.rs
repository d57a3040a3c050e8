//! Clap argument definitions for the `jql` CLI.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, builder::RangedU64ValueParser};
use jql_query::MAX_DEPTH_LIMIT;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "jql")]
#[command(about = "Parse, inspect and validate JQL queries")]
pub struct Cli {
    /// Log verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared options for commands that parse a query.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// The query text, or `-` to read it from stdin
    pub query: String,

    /// Locale for error messages [default: from config, else en]
    #[arg(long)]
    pub locale: Option<String>,

    /// Deepest nesting of parentheses and NOT, at most 256 [default: 128]
    #[arg(long, value_parser = max_depth_parser())]
    pub max_depth: Option<usize>,

    /// Parse a where-clause only; ORDER BY is an error
    #[arg(long)]
    pub clause: bool,
}

/// Accepts depths from 1 to [`MAX_DEPTH_LIMIT`].
fn max_depth_parser() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(1..=MAX_DEPTH_LIMIT as u64)
}

/// Arguments for `jql parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    #[command(flatten)]
    /// Query input options.
    pub input: QueryArgs,

    /// Print the clause tree instead of canonical text
    #[arg(long, conflicts_with = "json")]
    pub tree: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Color the canonical text by token class
    #[arg(long, conflicts_with_all = ["tree", "json"])]
    pub highlight: bool,
}

/// Arguments for `jql validate`.
#[derive(Args, Debug, Clone)]
pub struct ValidateCommand {
    #[command(flatten)]
    /// Query input options.
    pub input: QueryArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// What `jql probe` checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProbeKind {
    /// A known field name or `cf[N]` reference
    Field,
    /// A registered, enabled function
    Function,
    /// A value usable without quotes
    Value,
    /// A function argument usable without quotes
    Argument,
}

/// Arguments for `jql probe`.
#[derive(Args, Debug, Clone)]
pub struct ProbeCommand {
    /// What to check
    #[arg(value_enum)]
    pub kind: ProbeKind,

    /// Text to check
    pub text: String,
}

/// Arguments for `jql init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.jql.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `jql` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse a query and print its canonical form
    #[command(after_help = "\
QUERY SYNTAX:
  field = value               Comparison (= != ~ !~ < <= > >=)
  field IN (a, b)             Membership, also NOT IN
  field IS EMPTY              Emptiness, also IS NOT, NULL
  field WAS value BY user     History, also WAS NOT, WAS IN
  field CHANGED FROM a TO b   Change history
  cf[10010] = x               Custom field by id
  a AND (b OR NOT c)          Boolean logic, also & && | || !
  ... ORDER BY field DESC     Sorting

EXAMPLES:
  jql parse 'project = HSP AND status IN (Open, \"In Progress\")'
  jql parse --tree 'a = 1 OR b = 2 AND c = 3'
  jql parse --json 'assignee = currentUser() ORDER BY created DESC'
  echo 'priority > 3' | jql parse -")]
    Parse(ParseCommand),

    /// Parse a query and check its fields and functions
    Validate(ValidateCommand),

    /// Check a single field name, function name, value or argument
    Probe(ProbeCommand),

    /// Initialize jql configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and diagnose issues
    Check,
}
