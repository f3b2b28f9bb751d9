//! Logging and observability
//!
//! Structured logging built on `tracing`:
//! - Human-readable console output on stderr
//! - Optional JSON file logs with rotation
//! - Per-object progress macros used by the backup pipeline
//!
//! # Example
//!
//! ```no_run
//! use sfvault::logging::init_logging;
//! use sfvault::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Backup started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of one object's backup with its position in the run
///
/// # Example
///
/// ```no_run
/// use sfvault::log_object_start;
/// use sfvault::domain::ObjectType;
///
/// let object = ObjectType::new("Account").unwrap();
/// log_object_start!(&object, 1, 40);
/// ```
#[macro_export]
macro_rules! log_object_start {
    ($object:expr, $position:expr, $total:expr) => {
        tracing::info!(
            object = %$object,
            position = $position,
            total = $total,
            "Executing {} ({} of {})",
            $object,
            $position,
            $total
        );
    };
}

/// Log the number of records collected for one object
///
/// # Example
///
/// ```no_run
/// use sfvault::log_object_complete;
/// use std::time::Duration;
///
/// log_object_complete!("Account", 1200, Duration::from_secs(3));
/// ```
#[macro_export]
macro_rules! log_object_complete {
    ($object:expr, $count:expr, $duration:expr) => {
        tracing::info!(
            object = %$object,
            records = $count,
            duration_ms = $duration.as_millis() as u64,
            "{} records collected",
            $count
        );
    };
}

/// Log one fetched page of the Id-cursor pagination
///
/// # Example
///
/// ```no_run
/// use sfvault::log_page_fetched;
///
/// log_page_fetched!("Contact", 3, 10000, "003000000000XYZ");
/// ```
#[macro_export]
macro_rules! log_page_fetched {
    ($object:expr, $page:expr, $rows:expr, $cursor:expr) => {
        tracing::debug!(
            object = %$object,
            page = $page,
            rows = $rows,
            cursor = %$cursor,
            "Fetched page"
        );
    };
}

/// Log the failure that ended one object's pipeline
///
/// # Example
///
/// ```no_run
/// use sfvault::log_object_failed;
///
/// log_object_failed!("Contact", "Contact", "Salesforce error: Query failed");
/// ```
#[macro_export]
macro_rules! log_object_failed {
    ($object:expr, $table:expr, $error:expr) => {
        tracing::error!(
            object = %$object,
            table = %$table,
            error = %$error,
            "Object backup failed"
        );
    };
}
