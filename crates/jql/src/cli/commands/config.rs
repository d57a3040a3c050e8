//! Implementation of `jql config`.

use std::process::ExitCode;

use jql_highlight::Highlighter;

use crate::cli::{context::CommandContext, output::dim};

/// Shows effective configuration settings, preceded by the files they came from.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;
    let toml = match config.to_toml() {
        Ok(toml) => toml,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if config.sources.is_empty() {
        println!("{}", dim("# defaults (no configuration files found)"));
    }
    for path in &config.sources {
        println!("{}", dim(&format!("# from {}", path.display())));
    }
    print!("{}", Highlighter::new().highlight_toml(&toml));
    ExitCode::SUCCESS
}
