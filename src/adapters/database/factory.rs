//! Database sink factory
//!
//! This module provides the factory function that builds the SQL sink from
//! configuration.

use crate::adapters::database::traits::SqlSink;
use crate::adapters::postgresql::adapter::PostgreSQLSink;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::config::schema::SfVaultConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Create the SQL sink described by the configuration
///
/// # Errors
///
/// Returns an error if the connection string is invalid or the pool cannot be
/// built. No connection is opened until the first write or connection test.
pub async fn create_sink(config: &SfVaultConfig) -> Result<Arc<dyn SqlSink>> {
    tracing::info!("Creating PostgreSQL sink");
    let client = PostgreSQLClient::new(config.postgresql.clone()).await?;
    let sink = PostgreSQLSink::new(client, config.backup.write_chunk_size);

    Ok(Arc::new(sink) as Arc<dyn SqlSink>)
}
