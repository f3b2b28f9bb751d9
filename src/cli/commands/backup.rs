//! Backup command implementation
//!
//! This module implements the `backup` command for copying Salesforce objects
//! into PostgreSQL tables.

use super::{
    connect_or_report, exit_code_for, load_or_report, EXIT_CONFIG, EXIT_CONNECTION, EXIT_OK,
    EXIT_PARTIAL,
};
use crate::adapters::database::create_sink;
use crate::adapters::salesforce::PlatformApi;
use crate::config::SfVaultConfig;
use crate::core::backup::{BackupOptions, BackupOrchestrator, BackupReport};
use crate::domain::ids::parse_object_list;
use crate::domain::ObjectType;
use clap::Args;
use std::sync::Arc;

/// Arguments for the backup command
#[derive(Args, Debug)]
pub struct BackupArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - fetch and normalize without writing to PostgreSQL
    #[arg(long)]
    pub dry_run: bool,

    /// Object types to back up (comma-separated); default is the full catalog
    #[arg(long)]
    pub objects: Option<String>,

    /// Object types to skip when backing up the full catalog (comma-separated)
    #[arg(long)]
    pub exclude: Option<String>,

    /// Override records per page
    #[arg(long)]
    pub batch_size: Option<usize>,
}

impl BackupArgs {
    /// Apply CLI overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut SfVaultConfig) {
        if let Some(objects) = &self.objects {
            let objects: Vec<String> = parse_object_list(objects)
                .into_iter()
                .map(ObjectType::into_inner)
                .collect();
            tracing::info!(objects = ?objects, "Overriding objects from CLI");
            config.backup.objects = objects;
        }

        if let Some(exclude) = &self.exclude {
            let exclude: Vec<String> = parse_object_list(exclude)
                .into_iter()
                .map(ObjectType::into_inner)
                .collect();
            tracing::info!(exclude = ?exclude, "Overriding exclusions from CLI");
            config.backup.exclude_objects = exclude;
        }

        if let Some(batch_size) = self.batch_size {
            tracing::info!(batch_size, "Overriding batch size from CLI");
            config.backup.batch_size = batch_size;
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
    }

    /// Execute the backup command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting backup command");

        let mut config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        let dry_run = config.application.dry_run;
        let objects = object_types(&config.backup.objects);

        if dry_run {
            tracing::info!("Dry run mode enabled - no tables will be written");
            println!("🔍 DRY RUN MODE - No data will be written to the database");
            println!();
        }

        if !self.yes && !dry_run {
            println!("Backup Configuration:");
            println!(
                "  Objects: {}",
                if objects.is_empty() {
                    "Full catalog".to_string()
                } else {
                    format!("{:?}", config.backup.objects)
                }
            );
            if objects.is_empty() && !config.backup.exclude_objects.is_empty() {
                println!("  Excluded: {:?}", config.backup.exclude_objects);
            }
            println!("  Schema: {}", config.postgresql.schema);
            println!("  Batch size: {}", config.backup.batch_size);
            println!("  Existing tables are dropped and recreated.");
            println!();
            print!("Proceed with backup? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Backup cancelled.");
                return Ok(EXIT_OK);
            }
        }

        let api: Arc<dyn PlatformApi> = match connect_or_report(&config).await {
            Ok(client) => Arc::new(client),
            Err(code) => return Ok(code),
        };

        let sink = match create_sink(&config).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create PostgreSQL sink");
                eprintln!("Failed to initialize PostgreSQL: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if !dry_run {
            if let Err(e) = sink.test_connection().await {
                tracing::error!(error = %e, "PostgreSQL connection test failed");
                eprintln!("Failed to connect to PostgreSQL: {e}");
                return Ok(EXIT_CONNECTION);
            }
        }

        let options = BackupOptions {
            schema: config.postgresql.schema.clone(),
            batch_size: config.backup.batch_size,
            dry_run,
            exclude: object_types(&config.backup.exclude_objects),
        };
        let orchestrator = BackupOrchestrator::new(api, sink, options);

        println!("🚀 Starting backup...");
        println!();

        let requested = if objects.is_empty() { None } else { Some(objects) };
        let report = match orchestrator.run(requested).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "Backup failed");
                eprintln!("Backup failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        print_report(&report);

        let exit_code = if report.is_successful() {
            println!("✅ Backup completed successfully!");
            EXIT_OK
        } else {
            println!("⚠️  Backup completed with failures");
            EXIT_PARTIAL
        };

        Ok(exit_code)
    }
}

fn object_types(names: &[String]) -> Vec<ObjectType> {
    names
        .iter()
        .filter_map(|name| ObjectType::new(name.trim()).ok())
        .collect()
}

fn print_report(report: &BackupReport) {
    let width = report
        .results
        .iter()
        .map(|r| r.object.as_str().len())
        .max()
        .unwrap_or(6)
        .max(6);

    println!("{:<width$}  {:>10}  {:<7}", "Object", "Records", "Status");
    for result in &report.results {
        println!(
            "{:<width$}  {:>10}  {:<7}",
            result.object.as_str(),
            result.record_count,
            result.status
        );
        if let Some(error) = &result.error {
            println!("{:<width$}  {}", "", error);
        }
    }

    println!();
    println!("📊 Backup Summary:");
    println!("  Total Objects: {}", report.total_objects());
    println!("  Succeeded: {}", report.succeeded());
    println!("  Failed: {}", report.failed());
    println!("  Total Records: {}", report.total_records());
    println!("  Started: {}", report.started_at.to_rfc3339());
    println!("  Duration: {:.2}s", report.duration.as_secs_f64());
    println!();
}
