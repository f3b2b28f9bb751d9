//! Id-cursor paged fetching
//!
//! Records are pulled in pages of `batch_size`, ordered by `Id`. Each page
//! after the first resumes strictly after the last `Id` seen, so the loop
//! never depends on server-side offsets.

use crate::adapters::salesforce::PlatformApi;
use crate::core::schema::list_fields;
use crate::domain::{FieldName, ObjectType, Record, RecordSet, Result, SalesforceError, SfVaultError};
use serde_json::Value;

/// Default page size for record fetching
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Build the SOQL for one page
///
/// ```
/// use sfvault::core::fetch::build_page_query;
/// use sfvault::domain::{FieldName, ObjectType};
///
/// let object = ObjectType::new("Account").unwrap();
/// let fields = vec![FieldName::new("Id").unwrap(), FieldName::new("Name").unwrap()];
///
/// assert_eq!(
///     build_page_query(&object, &fields, 500, Some("001000000000123")),
///     "SELECT Id, Name FROM Account WHERE Id > '001000000000123' ORDER BY Id LIMIT 500"
/// );
/// ```
pub fn build_page_query(
    object: &ObjectType,
    fields: &[FieldName],
    batch_size: usize,
    after_id: Option<&str>,
) -> String {
    let projection = fields
        .iter()
        .map(FieldName::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    match after_id {
        Some(id) => format!(
            "SELECT {projection} FROM {object} WHERE Id > '{}' ORDER BY Id LIMIT {batch_size}",
            escape_literal(id)
        ),
        None => format!("SELECT {projection} FROM {object} ORDER BY Id LIMIT {batch_size}"),
    }
}

fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Keep only the requested fields that the raw row actually carries
fn project(mut raw: Record, fields: &[FieldName]) -> Record {
    let mut row = Record::new();
    for field in fields {
        if let Some(value) = raw.remove(field.as_str()) {
            row.insert(field.to_string(), value);
        }
    }
    row
}

/// Fetch every record of `object`, projected to `fields`
///
/// Pages are requested until one returns fewer than `batch_size` rows, so a
/// total that is an exact multiple of `batch_size` costs one extra empty page.
///
/// # Errors
///
/// Returns a validation error for `batch_size == 0`, `InvalidResponse` if a
/// full page ends with a row lacking `Id`, and propagates query failures.
pub async fn fetch_all(
    api: &dyn PlatformApi,
    object: &ObjectType,
    fields: &[FieldName],
    batch_size: usize,
) -> Result<RecordSet> {
    if batch_size == 0 {
        return Err(SfVaultError::Validation(
            "batch_size must be greater than 0".to_string(),
        ));
    }

    let mut records = RecordSet::new();
    let mut cursor: Option<String> = None;
    let mut page = 0usize;

    loop {
        let soql = build_page_query(object, fields, batch_size, cursor.as_deref());
        let rows = api.query_all(&soql).await?;
        page += 1;

        let full_page = rows.len() >= batch_size;
        let next_cursor = if full_page {
            let last_id = rows
                .last()
                .and_then(|r| r.get("Id"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    SalesforceError::InvalidResponse(format!(
                        "{object} page {page} ended with a row without Id"
                    ))
                })?;
            Some(last_id)
        } else {
            None
        };

        crate::log_page_fetched!(object, page, rows.len(), cursor.as_deref().unwrap_or("-"));

        for raw in rows {
            records.push(project(raw, fields));
        }

        match next_cursor {
            Some(id) => cursor = Some(id),
            None => break,
        }
    }

    Ok(records)
}

/// List the fields of `object` and fetch all of its records
///
/// # Errors
///
/// Propagates describe and fetch failures.
pub async fn fetch_object_data(
    api: &dyn PlatformApi,
    object: &ObjectType,
    batch_size: usize,
) -> Result<RecordSet> {
    let fields = list_fields(api, object).await?;
    fetch_all(api, object, &fields, batch_size).await
}
