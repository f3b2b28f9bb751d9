//! PostgreSQL database integration
//!
//! This module provides the PostgreSQL destination for backed-up objects.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgreSQLSink;
pub use client::PostgreSQLClient;
pub use models::{ColumnPlan, ColumnType};
