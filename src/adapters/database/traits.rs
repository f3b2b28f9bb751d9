//! Database abstraction traits
//!
//! This module defines the trait that SQL destinations must implement to
//! receive backed-up record sets.

use crate::domain::{RecordSet, Result};
use async_trait::async_trait;

/// Outcome of writing one record set to one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableWriteResult {
    /// Schema-qualified table that now holds the rows
    pub table: String,

    /// Number of rows inserted
    pub rows_written: u64,

    /// Number of INSERT statements issued
    pub insert_statements: usize,
}

/// SQL destination for record sets
///
/// Writes are destructive: a table that already exists is replaced with the
/// columns and rows of the new record set.
#[async_trait]
pub trait SqlSink: Send + Sync {
    /// Test the database connection
    ///
    /// # Errors
    ///
    /// Returns an error if the connection test fails.
    async fn test_connection(&self) -> Result<()>;

    /// Ensure the target schema exists, creating it if necessary
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    async fn ensure_schema_exists(&self, schema: &str) -> Result<()>;

    /// Replace `schema.table` with the contents of `records`
    ///
    /// The drop, create, and all inserts happen in one transaction, so a
    /// failed write leaves the previous table untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; the transaction is rolled back.
    async fn write_table(
        &self,
        schema: &str,
        table: &str,
        records: &RecordSet,
    ) -> Result<TableWriteResult>;

    /// Human-readable destination description with credentials redacted
    fn target_description(&self) -> String;
}
