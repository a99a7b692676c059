//! Sieve CLI - column type inference and data quality checks.

mod cli;
mod commands;
mod logging;

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Commands};
use logging::LogConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init_logging(
        &LogConfig::from_verbosity(cli.verbose, cli.quiet)
            .with_ansi(std::io::stderr().is_terminal()),
    );

    let result = match cli.command {
        Commands::Check(args) => commands::check::run(args),
        Commands::Infer { file, json } => commands::infer::run(file, json),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
