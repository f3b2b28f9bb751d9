//! List-objects command implementation

use super::{connect_or_report, exit_code_for, load_or_report, EXIT_OK};
use crate::core::schema::list_object_types;
use clap::Args;

/// Arguments for the list-objects command
#[derive(Args, Debug)]
pub struct ListObjectsArgs {}

impl ListObjectsArgs {
    /// Execute the list-objects command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let client = match connect_or_report(&config).await {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        match list_object_types(&client).await {
            Ok(objects) => {
                for object in &objects {
                    println!("{object}");
                }
                tracing::info!(objects = objects.len(), "Listed object catalog");
                Ok(EXIT_OK)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to list objects");
                eprintln!("Failed to list objects: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}
