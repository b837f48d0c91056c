//! Wayfinder CLI - inspect troubleshooting flows and walk them interactively

mod cli;
mod ui;

use clap::Parser;
use wayfinder::core::logging::init_logging;

fn main() {
    let cli_args = cli::Cli::parse();

    if let Err(e) = init_logging(
        Some(cli_args.log_level.as_str()),
        Some(cli_args.log_format.as_str()),
    ) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    if let Err(e) = cli::run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
