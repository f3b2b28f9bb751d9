//! Salesforce adapter implementation
//!
//! This module provides the integration with the Salesforce REST and Bulk APIs:
//! the [`PlatformApi`] trait, its reqwest-backed client, and wire models.

pub mod api;
pub mod client;
pub mod models;

pub use api::PlatformApi;
pub use client::SalesforceClient;
pub use models::{ChildRelationshipDescribe, FieldDescribe, ObjectDescribe, UpdateResult};
