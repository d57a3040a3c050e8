//! Shared context for running CLI commands.

use std::{
    env,
    io::{self, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use jql_config::Config;
use jql_query::{Catalog, JqlQueryParser, ParserOptions};
use tracing::debug;

use crate::cli::args::QueryArgs;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Parser honoring a `--max-depth` override.
    pub fn parser(&self, args: &QueryArgs) -> JqlQueryParser {
        let options = ParserOptions {
            max_depth: args.max_depth.unwrap_or(self.config.parser.max_depth),
        };
        JqlQueryParser::new(options)
    }

    /// Locale from `--locale`, else the configured one.
    pub fn locale<'a>(&'a self, args: &'a QueryArgs) -> &'a str {
        args.locale
            .as_deref()
            .unwrap_or(&self.config.messages.locale)
    }

    /// Message catalog from configuration.
    pub fn catalog(&self) -> Catalog {
        self.config.catalog()
    }

    /// Returns the query text, reading stdin when it is `-`.
    pub fn query_text(&self, args: &QueryArgs) -> Result<String, ExitCode> {
        if args.query != "-" {
            return Ok(args.query.clone());
        }
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(|e| {
            eprintln!("error: failed to read query from stdin: {e}");
            ExitCode::FAILURE
        })?;
        let trimmed = text.trim_end_matches(['\r', '\n']).len();
        text.truncate(trimmed);
        debug!(bytes = text.len(), "read query from stdin");
        Ok(text)
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
