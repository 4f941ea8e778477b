//! esdc CLI - Command-line interface
//!
//! Runs one compliance rule per invocation. The exit status is 0 when the
//! rule passed or did not apply, 1 when it failed and 2 when a dataset or the
//! collection could not be processed.

mod cli;
mod commands;
mod errors;
mod output;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize tracing on stderr so JSON output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute the command
    match commands::execute(cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            errors::from_anyhow(e).display();
            ExitCode::from(commands::Outcome::Error.code())
        }
    }
}
