//! Core business logic for sfvault.
//!
//! # Modules
//!
//! - [`schema`] - Object catalog, field and child-relationship introspection
//! - [`fetch`] - Id-cursor paged record fetching
//! - [`normalize`] - Serialization of mapping-valued columns to JSON text
//! - [`sink`] - Table naming and record set writes
//! - [`backup`] - Per-object backup orchestration and reporting
//! - [`update`] - Chunked bulk updates
//!
//! # Backup Workflow
//!
//! For each object type, strictly in sequence:
//!
//! 1. **Describe**: List the object's fields
//! 2. **Fetch**: Page through all records ordered by `Id`
//! 3. **Normalize**: Serialize compound (mapping) columns to JSON text
//! 4. **Write**: Replace the object's table in the destination schema
//! 5. **Report**: Record success with the record count, or failure with the error
//!
//! # Example
//!
//! ```rust,no_run
//! use sfvault::adapters::database::create_sink;
//! use sfvault::adapters::salesforce::SalesforceClient;
//! use sfvault::config::load_config;
//! use sfvault::core::backup::run_backup;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("sfvault.toml")?;
//! let api = Arc::new(SalesforceClient::connect(&config.salesforce).await?);
//! let sink = create_sink(&config).await?;
//!
//! let report = run_backup(api, sink, &config.postgresql.schema, None, 10_000).await?;
//!
//! println!("Succeeded: {}", report.succeeded());
//! println!("Failed: {}", report.failed());
//! # Ok(())
//! # }
//! ```

pub mod backup;
pub mod fetch;
pub mod normalize;
pub mod schema;
pub mod sink;
pub mod update;

#[cfg(test)]
pub(crate) mod testing;

pub use backup::{run_backup, BackupReport, BackupResult, BackupStatus};
pub use fetch::fetch_object_data;
pub use normalize::normalize;
pub use schema::{list_child_relationships, list_fields, list_object_types, ChildRelationship};
pub use sink::write_to_sql;
pub use update::bulk_update;
