//! PostgreSQL column models
//!
//! Column types are inferred from every value of a column, then each cell is
//! converted into a typed bind parameter.

use serde_json::Value;
use tokio_postgres::types::ToSql;

/// Boxed bind parameter that can be held across an await point
pub type SqlParam = Box<dyn ToSql + Sync + Send>;

/// SQL type chosen for one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Boolean,
    BigInt,
    Double,
    Text,
}

impl ColumnType {
    /// Infer the narrowest type that holds every non-null value
    ///
    /// A column with no non-null values is TEXT.
    pub fn infer<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut inferred: Option<ColumnType> = None;

        for value in values {
            let current = match value {
                Value::Null => continue,
                Value::Bool(_) => ColumnType::Boolean,
                Value::Number(n) if n.is_i64() => ColumnType::BigInt,
                Value::Number(_) => ColumnType::Double,
                _ => return ColumnType::Text,
            };

            inferred = Some(match (inferred, current) {
                (None, t) => t,
                (Some(a), b) if a == b => a,
                (Some(ColumnType::BigInt), ColumnType::Double)
                | (Some(ColumnType::Double), ColumnType::BigInt) => ColumnType::Double,
                _ => return ColumnType::Text,
            });
        }

        inferred.unwrap_or(ColumnType::Text)
    }

    /// PostgreSQL type name used in CREATE TABLE
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Double => "DOUBLE PRECISION",
            ColumnType::Text => "TEXT",
        }
    }

    /// Convert a cell to a bind parameter of this column's type
    ///
    /// Arrays and objects in a TEXT column are stored as compact JSON.
    pub fn to_param(self, value: &Value) -> SqlParam {
        match self {
            ColumnType::Boolean => Box::new(value.as_bool()) as SqlParam,
            ColumnType::BigInt => Box::new(value.as_i64()),
            ColumnType::Double => Box::new(value.as_f64()),
            ColumnType::Text => Box::new(match value {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            }),
        }
    }
}

/// Planned column of a destination table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    pub name: String,
    pub column_type: ColumnType,
}
