//! CLI command implementations
//!
//! Every command returns its process exit code:
//! 0 success, 1 partial failure, 2 configuration error, 4 connection error,
//! 5 fatal error.

pub mod backup;
pub mod describe;
pub mod init;
pub mod list_objects;
pub mod update;
pub mod validate;

use crate::adapters::salesforce::SalesforceClient;
use crate::config::{load_config, SfVaultConfig};
use crate::domain::{SalesforceError, SfVaultError};

pub const EXIT_OK: i32 = 0;
pub const EXIT_PARTIAL: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_CONNECTION: i32 = 4;
pub const EXIT_FATAL: i32 = 5;

/// Exit code for an error that ended a command
pub fn exit_code_for(error: &SfVaultError) -> i32 {
    match error {
        SfVaultError::Configuration(_) | SfVaultError::Validation(_) => EXIT_CONFIG,
        SfVaultError::Connection(_)
        | SfVaultError::Salesforce(SalesforceError::ConnectionFailed(_))
        | SfVaultError::Salesforce(SalesforceError::AuthenticationFailed(_)) => EXIT_CONNECTION,
        _ => EXIT_FATAL,
    }
}

/// Load and validate the configuration, printing the failure
fn load_or_report(config_path: &str) -> Result<SfVaultConfig, i32> {
    load_config(config_path).map_err(|e| {
        tracing::error!(error = %e, config_path = %config_path, "Failed to load configuration");
        eprintln!("Failed to load configuration from {config_path}: {e}");
        EXIT_CONFIG
    })
}

/// Authenticate against Salesforce, printing the failure
async fn connect_or_report(config: &SfVaultConfig) -> Result<SalesforceClient, i32> {
    SalesforceClient::connect(&config.salesforce)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to Salesforce");
            eprintln!("Failed to connect to Salesforce: {e}");
            exit_code_for(&e)
        })
}
