//! Backup results and reporting
//!
//! This module defines structures for tracking and reporting backup results.

use crate::domain::ObjectType;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Outcome of backing up one object type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupStatus {
    /// Records fetched and written (or fetched only, in dry-run mode)
    Success,
    /// Any step of the object's pipeline failed
    Failed,
}

impl fmt::Display for BackupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupStatus::Success => write!(f, "success"),
            BackupStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Result entry for one object type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackupResult {
    /// Object type processed
    pub object: ObjectType,

    /// Records collected; 0 for a failed object
    pub record_count: usize,

    /// Success or failure
    pub status: BackupStatus,

    /// Destination table name
    pub table: String,

    /// Error message of a failed object
    pub error: Option<String>,

    /// Time spent on this object
    #[serde(serialize_with = "serialize_duration_ms")]
    pub duration: Duration,
}

impl BackupResult {
    /// Create a success entry
    pub fn success(
        object: ObjectType,
        record_count: usize,
        table: String,
        duration: Duration,
    ) -> Self {
        Self {
            object,
            record_count,
            status: BackupStatus::Success,
            table,
            error: None,
            duration,
        }
    }

    /// Create a failure entry; the record count is always 0
    pub fn failed(object: ObjectType, table: String, error: String, duration: Duration) -> Self {
        Self {
            object,
            record_count: 0,
            status: BackupStatus::Failed,
            table,
            error: Some(error),
            duration,
        }
    }

    /// Whether this object was backed up
    pub fn is_success(&self) -> bool {
        self.status == BackupStatus::Success
    }
}

fn serialize_duration_ms<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Summary of a backup run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BackupReport {
    /// One entry per object type, in processing order
    pub results: Vec<BackupResult>,

    /// Duration of the whole run
    #[serde(serialize_with = "serialize_duration_ms")]
    pub duration: Duration,

    /// Whether sink writes were skipped
    pub dry_run: bool,

    /// When the run started
    pub started_at: DateTime<Utc>,
}

impl BackupReport {
    /// Create a new empty report
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            started_at: Utc::now(),
            ..Self::default()
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Append an object result
    pub fn push(&mut self, result: BackupResult) {
        self.results.push(result);
    }

    /// Number of objects processed
    pub fn total_objects(&self) -> usize {
        self.results.len()
    }

    /// Number of objects backed up
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of objects that failed
    pub fn failed(&self) -> usize {
        self.total_objects() - self.succeeded()
    }

    /// Records collected across successful objects
    pub fn total_records(&self) -> usize {
        self.results.iter().map(|r| r.record_count).sum()
    }

    /// Failed entries, in processing order
    pub fn failures(&self) -> impl Iterator<Item = &BackupResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    /// Check if every object was backed up
    pub fn is_successful(&self) -> bool {
        self.failed() == 0
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.results.is_empty() {
            return 100.0;
        }
        (self.succeeded() as f64 / self.total_objects() as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_objects = self.total_objects(),
            succeeded = self.succeeded(),
            failed = self.failed(),
            total_records = self.total_records(),
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            dry_run = self.dry_run,
            started_at = %self.started_at.to_rfc3339(),
            "Done ({} Failed)",
            self.failed()
        );

        for failure in self.failures() {
            tracing::warn!(
                object = %failure.object,
                error = failure.error.as_deref().unwrap_or_default(),
                "Object backup failed"
            );
        }
    }
}
