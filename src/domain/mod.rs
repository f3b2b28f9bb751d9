//! Domain models and types for sfvault.
//!
//! This module contains the core domain models and types shared by the
//! adapters and the backup pipeline.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ObjectType`], [`FieldName`])
//! - **Record models** ([`Record`], [`RecordSet`])
//! - **Error types** ([`SfVaultError`], [`SalesforceError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, SfVaultError>`]:
//!
//! ```rust,no_run
//! use sfvault::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = sfvault::config::load_config("sfvault.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{SalesforceError, SfVaultError};
pub use ids::{FieldName, ObjectType};
pub use record::{Record, RecordSet};
pub use result::Result;
