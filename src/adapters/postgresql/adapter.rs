//! PostgreSQL sink implementing the database trait
//!
//! Each write drops and recreates the destination table from the record set's
//! columns, then loads the rows with multi-row INSERT statements, all inside a
//! single transaction.

use crate::adapters::database::traits::{SqlSink, TableWriteResult};
use crate::adapters::postgresql::client::{pg_error_message, PostgreSQLClient};
use crate::adapters::postgresql::models::{ColumnPlan, ColumnType, SqlParam};
use crate::domain::{RecordSet, Result, SfVaultError};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// PostgreSQL caps bind parameters per statement at 65535
pub const MAX_BIND_PARAMS: usize = 65_535;

/// PostgreSQL implementation of [`SqlSink`]
pub struct PostgreSQLSink {
    client: Arc<PostgreSQLClient>,
    write_chunk_size: usize,
}

impl PostgreSQLSink {
    /// Create a new PostgreSQL sink
    pub fn new(client: PostgreSQLClient, write_chunk_size: usize) -> Self {
        Self::new_with_arc(Arc::new(client), write_chunk_size)
    }

    /// Create a new PostgreSQL sink with an Arc-wrapped client
    pub fn new_with_arc(client: Arc<PostgreSQLClient>, write_chunk_size: usize) -> Self {
        Self {
            client,
            write_chunk_size: write_chunk_size.max(1),
        }
    }
}

#[async_trait]
impl SqlSink for PostgreSQLSink {
    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn ensure_schema_exists(&self, schema: &str) -> Result<()> {
        if self.client.schema_exists(schema).await? {
            tracing::debug!(schema = %schema, "Schema already present");
            return Ok(());
        }
        self.client
            .batch_execute(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))
            .await?;
        tracing::debug!(schema = %schema, "Schema ensured");
        Ok(())
    }

    async fn write_table(
        &self,
        schema: &str,
        table: &str,
        records: &RecordSet,
    ) -> Result<TableWriteResult> {
        let columns = plan_columns(records);
        let qualified = qualified_name(schema, table);
        let chunk_rows = rows_per_statement(columns.len(), self.write_chunk_size);

        let mut conn = self.client.get_connection().await?;
        let tx = conn
            .transaction()
            .await
            .map_err(|e| db_error("begin transaction", &qualified, e))?;

        tx.batch_execute(&drop_table_sql(schema, table))
            .await
            .map_err(|e| db_error("drop table", &qualified, e))?;
        tx.batch_execute(&create_table_sql(schema, table, &columns))
            .await
            .map_err(|e| db_error("create table", &qualified, e))?;

        let mut rows_written = 0u64;
        let mut insert_statements = 0usize;

        if !columns.is_empty() {
            for (chunk_index, chunk) in records.rows().chunks(chunk_rows).enumerate() {
                let start = chunk_index * chunk_rows;
                let sql = insert_sql(schema, table, &columns, chunk.len());

                let params: Vec<SqlParam> = (start..start + chunk.len())
                    .flat_map(|row| {
                        columns
                            .iter()
                            .map(move |c| c.column_type.to_param(records.value(row, &c.name)))
                    })
                    .collect();
                let param_refs: Vec<&(dyn ToSql + Sync)> = params
                    .iter()
                    .map(|p| &**p as &(dyn ToSql + Sync))
                    .collect();

                rows_written += tx
                    .execute(sql.as_str(), &param_refs)
                    .await
                    .map_err(|e| db_error("insert rows", &qualified, e))?;
                insert_statements += 1;
            }
        }

        tx.commit()
            .await
            .map_err(|e| db_error("commit", &qualified, e))?;

        tracing::debug!(
            table = %qualified,
            columns = columns.len(),
            rows = rows_written,
            statements = insert_statements,
            "Table replaced"
        );

        Ok(TableWriteResult {
            table: qualified,
            rows_written,
            insert_statements,
        })
    }

    fn target_description(&self) -> String {
        self.client.connection_string_safe()
    }
}

fn db_error(step: &str, table: &str, err: tokio_postgres::Error) -> SfVaultError {
    SfVaultError::Database(format!(
        "Failed to {step} for {table}: {}",
        pg_error_message(&err)
    ))
}

/// Quote an identifier, doubling embedded quotes
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `"schema"."table"`
pub fn qualified_name(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(table))
}

/// Infer one column plan per record set column, in column order
pub fn plan_columns(records: &RecordSet) -> Vec<ColumnPlan> {
    records
        .columns()
        .iter()
        .map(|name| ColumnPlan {
            name: name.clone(),
            column_type: ColumnType::infer(records.column_values(name)),
        })
        .collect()
}

/// Rows per INSERT so a statement stays under the bind parameter limit
pub fn rows_per_statement(column_count: usize, write_chunk_size: usize) -> usize {
    if column_count == 0 {
        return write_chunk_size.max(1);
    }
    write_chunk_size.min(MAX_BIND_PARAMS / column_count).max(1)
}

pub fn drop_table_sql(schema: &str, table: &str) -> String {
    format!("DROP TABLE IF EXISTS {}", qualified_name(schema, table))
}

pub fn create_table_sql(schema: &str, table: &str, columns: &[ColumnPlan]) -> String {
    let defs = columns
        .iter()
        .map(|c| format!("{} {}", quote_ident(&c.name), c.column_type.sql_type()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE TABLE {} ({})", qualified_name(schema, table), defs)
}

pub fn insert_sql(schema: &str, table: &str, columns: &[ColumnPlan], row_count: usize) -> String {
    let names = columns
        .iter()
        .map(|c| quote_ident(&c.name))
        .collect::<Vec<_>>()
        .join(", ");

    let width = columns.len();
    let tuples = (0..row_count)
        .map(|row| {
            let placeholders = (1..=width)
                .map(|col| format!("${}", row * width + col))
                .collect::<Vec<_>>()
                .join(", ");
            format!("({placeholders})")
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES {}",
        qualified_name(schema, table),
        names,
        tuples
    )
}
