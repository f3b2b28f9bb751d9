//! Chunked bulk updates
//!
//! Rows are submitted in chunks through the platform's bulk-update capability.
//! There is no rollback across chunks: when chunk N fails, chunks before it
//! stay applied and the remaining chunks are not submitted.

use crate::adapters::salesforce::{PlatformApi, UpdateResult};
use crate::domain::{ObjectType, Record, Result, SfVaultError};
use serde_json::Value;

/// Default rows per bulk-update chunk
pub const DEFAULT_UPDATE_BATCH_SIZE: usize = 1000;

/// Upper bound on rows in one bulk batch
pub const MAX_BULK_BATCH_ROWS: usize = 10_000;

fn validate(rows: &[Record], batch_size: usize) -> Result<()> {
    if batch_size == 0 || batch_size > MAX_BULK_BATCH_ROWS {
        return Err(SfVaultError::Validation(format!(
            "batch_size must be between 1 and {MAX_BULK_BATCH_ROWS}, got {batch_size}"
        )));
    }

    if let Some(index) = rows.iter().position(|row| {
        row.get("Id")
            .and_then(Value::as_str)
            .map_or(true, str::is_empty)
    }) {
        return Err(SfVaultError::Validation(format!(
            "Row {index} has no Id; every update row must carry the record Id"
        )));
    }

    Ok(())
}

/// Update `rows` of `object` in chunks of `batch_size`
///
/// Results are returned in input order.
///
/// # Errors
///
/// Returns a validation error for an out-of-range `batch_size` or a row
/// without `Id`, and propagates the first chunk failure.
pub async fn bulk_update(
    api: &dyn PlatformApi,
    object: &ObjectType,
    rows: &[Record],
    batch_size: usize,
) -> Result<Vec<UpdateResult>> {
    validate(rows, batch_size)?;

    let chunks = rows.len().div_ceil(batch_size);
    let mut results = Vec::with_capacity(rows.len());

    for (index, chunk) in rows.chunks(batch_size).enumerate() {
        tracing::debug!(
            object = %object,
            chunk = index + 1,
            chunks = chunks,
            rows = chunk.len(),
            "Submitting update chunk"
        );

        let chunk_results = api.bulk_update(object, chunk).await.map_err(|e| {
            tracing::error!(
                object = %object,
                chunk = index + 1,
                applied_chunks = index,
                error = %e,
                "Bulk update halted"
            );
            e
        })?;
        results.extend(chunk_results);
    }

    let failed = results.iter().filter(|r| !r.success).count();
    tracing::info!(
        object = %object,
        rows = rows.len(),
        chunks = chunks,
        failed = failed,
        "Bulk update complete"
    );

    Ok(results)
}
