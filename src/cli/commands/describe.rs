//! Describe command implementation
//!
//! Prints the field names of one object type, and optionally the child
//! relationships that point at it.

use super::{connect_or_report, exit_code_for, load_or_report, EXIT_CONFIG, EXIT_OK};
use crate::core::schema::{list_child_relationships, list_fields};
use crate::domain::ObjectType;
use clap::Args;

/// Arguments for the describe command
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Object API name, e.g. Account or Invoice__c
    pub object: String,

    /// Also list child relationships
    #[arg(long)]
    pub relationships: bool,
}

impl DescribeArgs {
    /// Execute the describe command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let object = match ObjectType::new(self.object.as_str()) {
            Ok(o) => o,
            Err(e) => {
                eprintln!("Invalid object name: {e}");
                return Ok(EXIT_CONFIG);
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

        let fields = match list_fields(&client, &object).await {
            Ok(f) => f,
            Err(e) => {
                tracing::error!(object = %object, error = %e, "Describe failed");
                eprintln!("Failed to describe {object}: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!("{object} ({} fields)", fields.len());
        for field in &fields {
            println!("  {field}");
        }

        if self.relationships {
            let children = match list_child_relationships(&client, &object).await {
                Ok(c) => c,
                Err(e) => {
                    tracing::error!(object = %object, error = %e, "Describe failed");
                    eprintln!("Failed to list child relationships of {object}: {e}");
                    return Ok(exit_code_for(&e));
                }
            };

            println!();
            println!("Child relationships ({}):", children.len());
            for child in &children {
                match &child.relationship_name {
                    Some(name) => println!("  {}.{} ({name})", child.child_object, child.field),
                    None => println!("  {}.{}", child.child_object, child.field),
                }
            }
        }

        Ok(EXIT_OK)
    }
}
