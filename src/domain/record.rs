//! Record and RecordSet models
//!
//! A [`Record`] is one row of one object type as returned by the platform,
//! projected to the requested fields. A [`RecordSet`] is the tabular view of
//! all records fetched for one object: rows plus the union of their columns.

use serde_json::{Map, Value};
use std::collections::HashSet;

/// One row of an object type: field name to scalar, string, or nested mapping
///
/// Backed by an insertion-ordered map so nested values keep the key order the
/// platform delivered them in.
pub type Record = Map<String, Value>;

static NULL: Value = Value::Null;

/// Ordered sequence of records materialized as rows x named columns
///
/// Columns are the union of all row keys in first-seen order. Rows are allowed
/// to omit columns; reading a missing cell yields `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    columns: Vec<String>,
    seen: HashSet<String>,
    rows: Vec<Record>,
}

impl RecordSet {
    /// Create an empty record set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record set with a known column order
    ///
    /// Columns declared here keep their position even when no row carries them.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for column in columns {
            set.add_column(column.into());
        }
        set
    }

    /// Build a record set from rows, deriving the column union
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut set = Self::new();
        for record in records {
            set.push(record);
        }
        set
    }

    /// Append a row, registering any new columns it introduces
    pub fn push(&mut self, record: Record) {
        for key in record.keys() {
            if !self.seen.contains(key) {
                self.add_column(key.clone());
            }
        }
        self.rows.push(record);
    }

    fn add_column(&mut self, column: String) {
        if self.seen.insert(column.clone()) {
            self.columns.push(column);
        }
    }

    /// Column names in first-seen order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in fetch order
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Consume the set and return its rows
    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the set holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value with tabular backfill: a missing key reads as `null`
    pub fn value(&self, row: usize, column: &str) -> &Value {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL)
    }

    /// All values of one column, in row order, missing cells as `null`
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows
            .iter()
            .map(move |r| r.get(column).unwrap_or(&NULL))
    }
}
