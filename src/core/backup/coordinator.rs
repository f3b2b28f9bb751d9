//! Backup orchestrator
//!
//! Drives the per-object pipeline (list fields, fetch, normalize, write) over
//! a list of object types, one object at a time. A failure anywhere in one
//! object's pipeline is recorded against that object and the run moves on.

use crate::adapters::database::SqlSink;
use crate::adapters::salesforce::PlatformApi;
use crate::core::backup::summary::{BackupReport, BackupResult};
use crate::core::fetch::{fetch_all, DEFAULT_BATCH_SIZE};
use crate::core::normalize::normalize;
use crate::core::schema::{list_fields, list_object_types};
use crate::core::sink::{sanitize_table_name, write_to_sql};
use crate::domain::{ObjectType, Result, SfVaultError};
use std::sync::Arc;
use std::time::Instant;

/// Options for a backup run
#[derive(Debug, Clone)]
pub struct BackupOptions {
    /// Destination schema
    pub schema: String,

    /// Page size for record fetching
    pub batch_size: usize,

    /// Fetch and normalize without writing
    pub dry_run: bool,

    /// Object types skipped when the full catalog is resolved
    pub exclude: Vec<ObjectType>,
}

impl Default for BackupOptions {
    fn default() -> Self {
        Self {
            schema: "public".to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            dry_run: false,
            exclude: Vec::new(),
        }
    }
}

/// Sequential backup of object types into a SQL sink
pub struct BackupOrchestrator {
    api: Arc<dyn PlatformApi>,
    sink: Arc<dyn SqlSink>,
    options: BackupOptions,
}

impl BackupOrchestrator {
    pub fn new(api: Arc<dyn PlatformApi>, sink: Arc<dyn SqlSink>, options: BackupOptions) -> Self {
        Self { api, sink, options }
    }

    /// Resolve the object types to back up
    ///
    /// An explicit non-empty list is used as given. Otherwise the full catalog
    /// is listed and the configured exclusions are removed.
    ///
    /// # Errors
    ///
    /// Catalog failures propagate.
    pub async fn resolve_objects(
        &self,
        object_types: Option<Vec<ObjectType>>,
    ) -> Result<Vec<ObjectType>> {
        match object_types {
            Some(objects) if !objects.is_empty() => Ok(objects),
            _ => {
                let catalog = list_object_types(self.api.as_ref()).await?;
                let total = catalog.len();
                let objects: Vec<ObjectType> = catalog
                    .into_iter()
                    .filter(|object| !self.options.exclude.contains(object))
                    .collect();

                tracing::info!(
                    catalog = total,
                    excluded = total - objects.len(),
                    "Resolved object catalog"
                );
                Ok(objects)
            }
        }
    }

    /// Back up every resolved object type, in order
    ///
    /// # Errors
    ///
    /// Only a zero batch size or a catalog failure propagates. Per-object
    /// failures are reported in the returned [`BackupReport`].
    ///
    /// A failure to ensure the destination schema is logged as a warning: the
    /// schema may already exist for a role that cannot create schemas, and if
    /// it does not, each object's write fails on its own.
    pub async fn run(&self, object_types: Option<Vec<ObjectType>>) -> Result<BackupReport> {
        if self.options.batch_size == 0 {
            return Err(SfVaultError::Validation(
                "batch_size must be greater than 0".to_string(),
            ));
        }

        let start = Instant::now();
        let objects = self.resolve_objects(object_types).await?;
        let mut report = BackupReport::new(self.options.dry_run);

        if self.options.dry_run {
            tracing::info!("Dry run: records are fetched but no tables are written");
        } else if let Err(e) = self.sink.ensure_schema_exists(&self.options.schema).await {
            tracing::warn!(
                schema = %self.options.schema,
                error = %e,
                "Could not ensure destination schema; continuing"
            );
        }

        tracing::info!(
            objects = objects.len(),
            source = %self.api.instance_url(),
            schema = %self.options.schema,
            target = %self.sink.target_description(),
            "Starting backup"
        );

        let total = objects.len();
        for (index, object) in objects.into_iter().enumerate() {
            crate::log_object_start!(&object, index + 1, total);

            let object_start = Instant::now();
            let table = sanitize_table_name(object.as_str());

            let result = match self.backup_object(&object).await {
                Ok(count) => {
                    crate::log_object_complete!(&object, count, object_start.elapsed());
                    BackupResult::success(object, count, table, object_start.elapsed())
                }
                Err(e) => {
                    crate::log_object_failed!(&object, &table, e);
                    BackupResult::failed(object, table, e.to_string(), object_start.elapsed())
                }
            };
            report.push(result);
        }

        let report = report.with_duration(start.elapsed());
        report.log_summary();
        Ok(report)
    }

    /// Run one object's pipeline and return its record count
    async fn backup_object(&self, object: &ObjectType) -> Result<usize> {
        let fields = list_fields(self.api.as_ref(), object).await?;
        let records = fetch_all(self.api.as_ref(), object, &fields, self.options.batch_size).await?;
        let records = normalize(records);
        let count = records.len();

        if self.options.dry_run {
            tracing::debug!(object = %object, records = count, "Skipping write (dry run)");
            return Ok(count);
        }

        let written = write_to_sql(
            &records,
            self.sink.as_ref(),
            &self.options.schema,
            object.as_str(),
        )
        .await?;

        tracing::debug!(
            object = %object,
            table = %written.table,
            rows = written.rows_written,
            statements = written.insert_statements,
            "Table replaced"
        );
        Ok(count)
    }
}

/// Back up `object_types` (or the full catalog when `None` or empty) into `schema`
///
/// # Example
///
/// ```no_run
/// use sfvault::core::backup::run_backup;
/// use sfvault::adapters::database::SqlSink;
/// use sfvault::adapters::salesforce::PlatformApi;
/// use sfvault::domain::ObjectType;
/// use std::sync::Arc;
///
/// # async fn example(api: Arc<dyn PlatformApi>, sink: Arc<dyn SqlSink>) -> sfvault::domain::Result<()> {
/// let objects = vec![ObjectType::new("Account").unwrap()];
/// let report = run_backup(api, sink, "public", Some(objects), 10_000).await?;
/// println!("{} of {} objects backed up", report.succeeded(), report.total_objects());
/// # Ok(())
/// # }
/// ```
pub async fn run_backup(
    api: Arc<dyn PlatformApi>,
    sink: Arc<dyn SqlSink>,
    schema: &str,
    object_types: Option<Vec<ObjectType>>,
    batch_size: usize,
) -> Result<BackupReport> {
    let options = BackupOptions {
        schema: schema.to_string(),
        batch_size,
        ..BackupOptions::default()
    };
    BackupOrchestrator::new(api, sink, options)
        .run(object_types)
        .await
}
