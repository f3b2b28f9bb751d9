//! Table naming and record set writes

use crate::adapters::database::{SqlSink, TableWriteResult};
use crate::domain::{RecordSet, Result};

/// Prefix for object names that cannot start a table name
pub const TABLE_PREFIX: &str = "o_";

/// Table name for an object type: prefixed with `o_` unless it starts with a letter
pub fn sanitize_table_name(name: &str) -> String {
    match name.chars().next() {
        Some(c) if c.is_alphabetic() => name.to_string(),
        _ => format!("{TABLE_PREFIX}{name}"),
    }
}

/// Replace `schema.<sanitized table_name>` with `records`
///
/// # Errors
///
/// Propagates sink failures.
pub async fn write_to_sql(
    records: &RecordSet,
    sink: &dyn SqlSink,
    schema: &str,
    table_name: &str,
) -> Result<TableWriteResult> {
    let table = sanitize_table_name(table_name);
    sink.write_table(schema, &table, records).await
}
