//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the sfvault configuration file.

use super::{EXIT_CONFIG, EXIT_OK};
use crate::adapters::postgresql::client::redact_connection_string;
use crate::config::loader::load_config;
use crate::config::{AuthType, SfVaultConfig};
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after env substitution and overrides
        match load_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                print_summary(&config);
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(EXIT_CONFIG)
            }
        }
    }
}

fn print_summary(config: &SfVaultConfig) {
    println!("Configuration Summary:");
    println!("  Environment: {:?}", config.environment);
    println!("  Log Level: {}", config.application.log_level);
    println!("  Dry Run: {}", config.application.dry_run);

    let sf = &config.salesforce;
    match sf.auth_type {
        AuthType::Password => {
            println!("  Salesforce Auth: password ({})", sf.login_url);
            println!(
                "  Salesforce User: {}",
                sf.username.as_deref().unwrap_or("-")
            );
        }
        AuthType::Token => {
            println!(
                "  Salesforce Auth: token ({})",
                sf.instance_url.as_deref().unwrap_or("-")
            );
        }
    }
    println!("  API Version: {}", sf.api_version);

    let pg = &config.postgresql;
    println!(
        "  PostgreSQL Connection: {}",
        redact_connection_string(pg.connection_string.expose_secret().as_ref())
    );
    println!("  Schema: {}", pg.schema);
    println!("  SSL Mode: {}", pg.ssl_mode);
    println!("  Max Connections: {}", pg.max_connections);

    let backup = &config.backup;
    if backup.objects.is_empty() {
        println!("  Objects: full catalog");
        if !backup.exclude_objects.is_empty() {
            println!("  Excluded: {:?}", backup.exclude_objects);
        }
    } else {
        println!("  Objects: {:?}", backup.objects);
    }
    println!("  Batch Size: {}", backup.batch_size);
    println!("  Write Chunk Size: {}", backup.write_chunk_size);
    println!();
}
