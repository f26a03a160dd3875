//! Address checker
//!
//! Classifies addresses given on the command line, or one per stdin line,
//! and prints a JSON object per input. Exits with status 1 when any input
//! is not a valid address of the requested network.

use std::io;
use std::process::ExitCode;

mod commands;
mod config;
mod error;

use clap::Parser;

use commands::Cli;
use config::CliConfig;
use error::CliError;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();
    let cli = Cli::parse();

    // Load configuration
    let config = CliConfig::from_env().map_err(CliError::from)?;
    log::debug!(
        "Loaded configuration: default_network={:?} trim={}",
        config.default_network,
        config.trim
    );

    if config.check_registry {
        coin_address::check_prefix_table().map_err(CliError::from)?;
    }

    let action = cli.command.resolve(&config).unwrap_or_else(|e| e.exit());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let all_valid = commands::run(&action, &config, stdin.lock(), stdout.lock())?;

    if all_valid {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
