//! Backup orchestration and reporting
//!
//! This module provides the full-catalog backup:
//! - Object resolution (explicit list or catalog minus exclusions)
//! - Per-object pipeline with fault isolation
//! - Summary and reporting

pub mod coordinator;
pub mod summary;

pub use coordinator::{run_backup, BackupOptions, BackupOrchestrator};
pub use summary::{BackupReport, BackupResult, BackupStatus};
