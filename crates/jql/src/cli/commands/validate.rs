//! Implementation of `jql validate`.

use std::process::ExitCode;

use super::parse_input;
use crate::cli::{
    args::ValidateCommand,
    context::CommandContext,
    output::{JsonValidated, print_issues, print_json, report_parse_error, success},
};

/// Parses a query, then checks its fields and functions against the configured registries.
///
/// Fails on a syntax error or when any issue is found.
pub fn run(ctx: &CommandContext, cmd: &ValidateCommand) -> ExitCode {
    let text = match ctx.query_text(&cmd.input) {
        Ok(text) => text,
        Err(code) => return code,
    };

    let query = match parse_input(ctx, &cmd.input, &text) {
        Ok(query) => query,
        Err(e) => {
            return report_parse_error(
                &e,
                &text,
                &ctx.catalog(),
                ctx.locale(&cmd.input),
                cmd.json,
            );
        }
    };

    let issues = ctx.config.validator().validate(&query);
    let status = if issues.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };

    if cmd.json {
        let printed = print_json(&JsonValidated {
            canonical: query.to_string(),
            valid: issues.is_empty(),
            issues: &issues,
        });
        return if issues.is_empty() { printed } else { status };
    }

    if issues.is_empty() {
        println!("{}", success("Query is valid."));
    } else {
        print_issues(&issues);
    }
    status
}
