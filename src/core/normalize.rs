//! Mapping-column normalization
//!
//! Compound fields such as addresses arrive as nested objects. Before a
//! record set reaches a flat table, every column holding at least one object
//! is rewritten so that each of its cells is compact JSON text.

use crate::domain::{Record, RecordSet};
use serde_json::Value;

/// Text stored for an absent or null cell in a mapping column
pub const EMPTY_MAPPING: &str = "{}";

/// Columns with at least one object value, in column order
pub fn mapping_columns(records: &RecordSet) -> Vec<String> {
    records
        .columns()
        .iter()
        .filter(|column| records.column_values(column).any(Value::is_object))
        .cloned()
        .collect()
}

/// Serialize mapping columns to JSON text; other columns pass through
///
/// Running this twice yields the same record set as running it once.
pub fn normalize(records: RecordSet) -> RecordSet {
    let targets = mapping_columns(&records);
    if targets.is_empty() {
        return records;
    }

    tracing::trace!(columns = ?targets, "Serializing mapping columns");

    let mut normalized = RecordSet::with_columns(records.columns().iter().cloned());
    for mut row in records.into_rows() {
        for column in &targets {
            let text = match row.get(column) {
                None | Some(Value::Null) => EMPTY_MAPPING.to_string(),
                Some(value) => value.to_string(),
            };
            row.insert(column.clone(), Value::String(text));
        }
        normalized.push(reorder(row, &normalized));
    }

    normalized
}

/// Keep each row's keys in column order after backfilled cells were appended
fn reorder(mut row: Record, set: &RecordSet) -> Record {
    let mut ordered = Record::new();
    for column in set.columns() {
        if let Some(value) = row.remove(column) {
            ordered.insert(column.clone(), value);
        }
    }
    ordered
}
