// sfvault - Salesforce to PostgreSQL Backup Tool
// Copyright (c) 2025 sfvault Contributors
// Licensed under the MIT License

//! # sfvault - Salesforce to PostgreSQL Backup
//!
//! sfvault copies every exportable object of a Salesforce org into its own
//! PostgreSQL table, one object at a time.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Introspecting** the object catalog, fields and child relationships
//! - **Fetching** records with Id-cursor pagination
//! - **Normalizing** compound fields into JSON text columns
//! - **Writing** each object to a replaced table in the configured schema
//! - **Updating** records in chunks through the Bulk API
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (schema, fetch, normalize, sink, backup, update)
//! - [`adapters`] - External integrations (Salesforce, PostgreSQL)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sfvault::adapters::database::create_sink;
//! use sfvault::adapters::salesforce::SalesforceClient;
//! use sfvault::config::load_config;
//! use sfvault::core::backup::run_backup;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("sfvault.toml")?;
//!
//!     let api = Arc::new(SalesforceClient::connect(&config.salesforce).await?);
//!     let sink = create_sink(&config).await?;
//!
//!     let report = run_backup(api, sink, &config.postgresql.schema, None, 10_000).await?;
//!
//!     println!(
//!         "Backed up {} records from {} objects ({} failed)",
//!         report.total_records(),
//!         report.succeeded(),
//!         report.failed()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Fault Isolation
//!
//! A failure while describing, fetching or writing one object is recorded as a
//! failed [`core::BackupResult`] with a record count of 0, and the run moves
//! on to the next object. Only catalog resolution failures abort a run.
//!
//! ## Error Handling
//!
//! sfvault uses the [`domain::SfVaultError`] type for all errors:
//!
//! ```rust,no_run
//! use sfvault::domain::SfVaultError;
//!
//! fn example() -> Result<(), SfVaultError> {
//!     let config = sfvault::config::load_config("sfvault.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! sfvault uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(object = "Account", records = 1200, "Table replaced");
//! warn!(object = "Contact", "Object backup failed");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
