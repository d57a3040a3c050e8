//! Implementation of `jql parse`.

use std::process::ExitCode;

use jql_highlight::highlight_query;
use tracing::debug;

use super::parse_input;
use crate::cli::{
    args::ParseCommand,
    context::CommandContext,
    output::{JsonParsed, print_json, report_parse_error},
};

/// Parses a query and prints it as canonical text, a clause tree or JSON.
pub fn run(ctx: &CommandContext, cmd: &ParseCommand) -> ExitCode {
    let text = match ctx.query_text(&cmd.input) {
        Ok(text) => text,
        Err(code) => return code,
    };

    let query = match parse_input(ctx, &cmd.input, &text) {
        Ok(query) => query,
        Err(e) => {
            debug!(key = e.message().key(), "query rejected");
            return report_parse_error(
                &e,
                &text,
                &ctx.catalog(),
                ctx.locale(&cmd.input),
                cmd.json,
            );
        }
    };

    if cmd.json {
        return print_json(&JsonParsed {
            canonical: query.to_string(),
            query: &query,
        });
    }
    if cmd.tree {
        print!("{}", query.tree());
    } else if cmd.highlight {
        println!("{}", highlight_query(&query.to_string()));
    } else {
        println!("{query}");
    }
    ExitCode::SUCCESS
}
