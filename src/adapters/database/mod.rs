//! Database abstraction layer
//!
//! This module provides a trait-based abstraction for the SQL destination the
//! backup writes into.

pub mod factory;
pub mod traits;

pub use factory::create_sink;
pub use traits::{SqlSink, TableWriteResult};
