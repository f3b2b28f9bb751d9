//! Update command implementation
//!
//! Reads a JSON array of row objects, each carrying the record `Id` and the
//! fields to change, and submits them through the bulk updater.

use super::{
    connect_or_report, exit_code_for, load_or_report, EXIT_CONFIG, EXIT_OK, EXIT_PARTIAL,
};
use crate::core::update::{bulk_update, DEFAULT_UPDATE_BATCH_SIZE};
use crate::domain::{ObjectType, Record, Result, SfVaultError};
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the update command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Object API name of the rows
    pub object: String,

    /// JSON file holding an array of row objects
    #[arg(short, long)]
    pub file: PathBuf,

    /// Rows per bulk batch
    #[arg(long, default_value_t = DEFAULT_UPDATE_BATCH_SIZE)]
    pub batch_size: usize,
}

/// Read update rows from a JSON array file
pub fn read_rows(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SfVaultError::Configuration(format!("Failed to read {}: {e}", path.display()))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        SfVaultError::Validation(format!(
            "{} must contain a JSON array of objects: {e}",
            path.display()
        ))
    })
}

impl UpdateArgs {
    /// Execute the update command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let object = match ObjectType::new(self.object.as_str()) {
            Ok(o) => o,
            Err(e) => {
                eprintln!("Invalid object name: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let rows = match read_rows(&self.file) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{e}");
                return Ok(exit_code_for(&e));
            }
        };

        let config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let client = match connect_or_report(&config).await {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        println!("🚀 Updating {} {object} rows...", rows.len());

        let results = match bulk_update(&client, &object, &rows, self.batch_size).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(object = %object, error = %e, "Bulk update failed");
                eprintln!("Bulk update failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let mut failed = 0usize;
        for result in &results {
            let id = result.id.as_deref().unwrap_or("-");
            if result.success {
                println!("  ✓ {id}");
            } else {
                failed += 1;
                println!("  ✗ {id}: {}", result.errors.join("; "));
            }
        }

        println!();
        println!("📊 Update Summary:");
        println!("  Rows: {}", results.len());
        println!("  Succeeded: {}", results.len() - failed);
        println!("  Failed: {failed}");

        Ok(if failed == 0 { EXIT_OK } else { EXIT_PARTIAL })
    }
}
