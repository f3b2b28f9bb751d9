// sfvault - Salesforce to PostgreSQL Backup Tool
// Copyright (c) 2025 sfvault Contributors
// Licensed under the MIT License

use clap::Parser;
use sfvault::cli::{Cli, Commands};
use sfvault::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let (log_level, logging) = cli.logging_settings();
    let guard = match init_logging(&log_level, &logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "sfvault - Salesforce to PostgreSQL Backup Tool"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Backup(args) => args.execute(&cli.config).await,
        Commands::ListObjects(args) => args.execute(&cli.config).await,
        Commands::Describe(args) => args.execute(&cli.config).await,
        Commands::Update(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
