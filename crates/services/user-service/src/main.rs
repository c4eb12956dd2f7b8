//! User Service - operator CLI for the identity domain.

use std::process::ExitCode;

use clap::Parser;

use user_service_lib::{cli::Cli, commands, UserServiceConfig};

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = UserServiceConfig::from_env();

    // Initialize tracing (verbose mode sets debug level)
    common::init_tracing(&config.service.log_level, cli.verbose);
    tracing::debug!(service = %config.service.service_name, "Configuration loaded");

    let result = config
        .install_denylists()
        .and_then(|()| commands::execute(cli.command));

    // Handle errors
    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!("Command failed: {}", e);
            eprintln!("{}: {}", e.code(), e.user_message());
            ExitCode::FAILURE
        }
    }
}
