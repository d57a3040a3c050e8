//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod init;
pub mod parse;
pub mod probe;
pub mod validate;

use std::process::ExitCode;

use jql_query::{JqlParseException, OrderBy, Query};

use super::{
    args::{Commands, QueryArgs},
    context::CommandContext,
};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Parse(cmd) => parse::run(ctx, &cmd),
        Commands::Validate(cmd) => validate::run(ctx, &cmd),
        Commands::Probe(cmd) => probe::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Check => check::run(ctx),
    }
}

/// Parses `text` as a full query, or as a bare clause with `--clause`.
fn parse_input(
    ctx: &CommandContext,
    args: &QueryArgs,
    text: &str,
) -> Result<Query, JqlParseException> {
    let parser = ctx.parser(args);
    if args.clause {
        let clause = parser.parse_clause(text)?;
        Ok(Query::new(Some(clause), OrderBy::new(Vec::new())))
    } else {
        parser.parse_query(text)
    }
}
