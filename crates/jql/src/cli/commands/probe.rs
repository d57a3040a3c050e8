//! Implementation of `jql probe`.

use std::process::ExitCode;

use crate::cli::{
    args::{ProbeCommand, ProbeKind},
    context::CommandContext,
    output::{success, warning},
};

/// Runs one validator probe; exits with failure when the text is rejected.
pub fn run(ctx: &CommandContext, cmd: &ProbeCommand) -> ExitCode {
    let validator = ctx.config.validator();
    let (accepted, what) = match cmd.kind {
        ProbeKind::Field => (validator.is_valid_field_name(&cmd.text), "field name"),
        ProbeKind::Function => (validator.is_valid_function_name(&cmd.text), "function name"),
        ProbeKind::Value => (validator.is_valid_value(&cmd.text), "unquoted value"),
        ProbeKind::Argument => (
            validator.is_valid_function_argument(&cmd.text),
            "unquoted function argument",
        ),
    };

    if accepted {
        println!("{}", success(&format!("valid {what}: {}", cmd.text)));
        ExitCode::SUCCESS
    } else {
        println!("{}", warning(&format!("not a valid {what}: {}", cmd.text)));
        ExitCode::FAILURE
    }
}
