//! External system integrations for sfvault.
//!
//! - [`salesforce`] - Salesforce REST and Bulk API client behind [`salesforce::PlatformApi`]
//! - [`database`] - SQL destination abstraction ([`database::SqlSink`])
//! - [`postgresql`] - PostgreSQL implementation of the sink
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the backup
//! pipeline can be exercised with in-memory implementations.
//!
//! ```rust,no_run
//! use sfvault::adapters::database::create_sink;
//! use sfvault::adapters::salesforce::SalesforceClient;
//! use sfvault::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("sfvault.toml")?;
//! let api = SalesforceClient::connect(&config.salesforce).await?;
//! let sink = create_sink(&config).await?;
//! sink.test_connection().await?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod postgresql;
pub mod salesforce;
