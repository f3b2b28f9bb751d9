//! Platform API trait definition
//!
//! `PlatformApi` is the seam between the backup pipeline and the Salesforce
//! REST/Bulk endpoints. The pipeline only ever needs three capabilities, so
//! tests can drive it with an in-memory implementation.

use super::models::{ObjectDescribe, UpdateResult};
use crate::domain::{ObjectType, Record, Result};
use async_trait::async_trait;

/// Capabilities the backup pipeline needs from the platform
///
/// # Example
///
/// ```no_run
/// use sfvault::adapters::salesforce::{PlatformApi, SalesforceClient};
/// use sfvault::config::SalesforceConfig;
/// use sfvault::domain::ObjectType;
///
/// # async fn example() -> sfvault::domain::Result<()> {
/// let client = SalesforceClient::connect(&SalesforceConfig::default()).await?;
///
/// let rows = client.query_all("SELECT Id FROM Account").await?;
/// let describe = client.describe(&ObjectType::new("Account").unwrap()).await?;
/// println!("{} rows, {} fields", rows.len(), describe.fields.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait PlatformApi: Send + Sync {
    /// Run a SOQL query and return every row, following server-side pagination
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails or cannot be parsed.
    async fn query_all(&self, soql: &str) -> Result<Vec<Record>>;

    /// Describe an object type: its fields in declaration order and its
    /// child relationships
    ///
    /// # Errors
    ///
    /// Returns `SalesforceError::DescribeFailed` if the object cannot be described.
    async fn describe(&self, object: &ObjectType) -> Result<ObjectDescribe>;

    /// Update rows of an object type through the bulk endpoint
    ///
    /// Every row must carry its `Id`. Results are returned in row order.
    ///
    /// # Errors
    ///
    /// Returns an error if the job cannot be created or the batch fails as a whole.
    /// Per-row failures are reported in the results, not as an error.
    async fn bulk_update(&self, object: &ObjectType, rows: &[Record]) -> Result<Vec<UpdateResult>>;

    /// Instance base URL, for logging
    fn instance_url(&self) -> &str;
}
