//! Configuration management for sfvault.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! sfvault uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SFVAULT_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sfvault::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("sfvault.toml")?;
//!
//! println!("Login URL: {}", config.salesforce.login_url);
//! println!("Target schema: {}", config.postgresql.schema);
//! println!("Page size: {}", config.backup.batch_size);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level and dry-run switch
//! - [`SalesforceConfig`] - org login, API version, credentials
//! - [`BackupConfig`] - object selection, page size, insert chunk size
//! - [`PostgreSQLConfig`] - destination database and schema
//! - [`LoggingConfig`] - local rolling file logs
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//!
//! [application]
//! log_level = "info"
//!
//! [salesforce]
//! login_url = "https://login.salesforce.com"
//! client_id = "${SF_CLIENT_ID}"
//! client_secret = "${SF_CLIENT_SECRET}"
//! username = "backup@example.com"
//! password = "${SF_PASSWORD}"
//! security_token = "${SF_SECURITY_TOKEN}"
//!
//! [backup]
//! batch_size = 10000
//!
//! [postgresql]
//! connection_string = "postgresql://backup:${PG_PASSWORD}@db:5432/salesforce"
//! schema = "salesforce"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, AuthType, BackupConfig, Environment, LoggingConfig, PostgreSQLConfig,
    SalesforceConfig, SfVaultConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
