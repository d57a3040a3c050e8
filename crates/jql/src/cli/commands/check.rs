//! Implementation of `jql check`.

use std::process::ExitCode;

use jql_config::{Config, ConfigWarning, discover_config_files};

use crate::cli::{
    context::CommandContext,
    output::{dim, header, success, warning},
};

/// Exit codes for `jql check`.
mod exit_codes {
    use std::process::ExitCode;

    /// Configuration is valid with no warnings.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// Configuration has warnings but is usable.
    pub const WARNINGS: ExitCode = ExitCode::FAILURE;
    /// Configuration has errors and cannot be used.
    pub const ERROR: ExitCode = ExitCode::FAILURE;
}

/// Loads configuration from scratch and reports errors and warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);

    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!("Run 'jql init' to create a configuration file.");
        return exit_codes::OK;
    }

    println!("{}", header("Config files:"));
    for path in &config_files {
        println!("  {}", path.display());
    }
    println!();

    let config = match Config::load_from_files(&config_files) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return exit_codes::ERROR;
        }
    };

    println!("{}", header("Registries:"));
    println!("  fields: {}", config.field_resolver().len());
    println!("  functions: {}", config.function_resolver().names().len());
    println!("  locale: {}", config.messages.locale);
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("{}", success("No issues found."));
        return exit_codes::OK;
    }

    println!("{}", header(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("  - {}", warning(&w.to_string()));
    }
    println!();
    print_hints(&warnings);

    exit_codes::WARNINGS
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings
        .iter()
        .map(|w| match w {
            ConfigWarning::UnknownMessageKey { .. } => {
                "Message keys start with 'jql.parse.'; check the spelling."
            }
            ConfigWarning::MissingArgument { .. } => {
                "{0} and {1} are the line and column; later placeholders depend on the message."
            }
            ConfigWarning::LocaleWithoutTemplates { .. } => {
                "Add a [messages.catalog.<locale>] table or change messages.locale."
            }
            ConfigWarning::NoFieldsKnown => {
                "Set [fields] system = true or list fields in [fields] known."
            }
        })
        .collect();
    hints.sort_unstable();
    hints.dedup();

    println!("Hints:");
    for hint in hints {
        println!("  - {hint}");
    }
}
