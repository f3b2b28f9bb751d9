//! Domain error types
//!
//! This module defines the error hierarchy for sfvault.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main sfvault error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum SfVaultError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Salesforce-related errors
    #[error("Salesforce error: {0}")]
    Salesforce(#[from] SalesforceError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network/connection errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Salesforce-specific errors
///
/// Errors that occur when talking to the Salesforce REST and Bulk APIs.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum SalesforceError {
    /// Failed to reach the Salesforce instance
    #[error("Failed to connect to Salesforce: {0}")]
    ConnectionFailed(String),

    /// OAuth2 login or session rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Response body could not be interpreted
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// SOQL query rejected
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Describe call failed
    #[error("Describe failed for {object}: {message}")]
    DescribeFailed { object: String, message: String },

    /// Bulk job or batch ended in a failed state
    #[error("Bulk job failed: {0}")]
    BulkJobFailed(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for SfVaultError {
    fn from(err: std::io::Error) -> Self {
        SfVaultError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SfVaultError {
    fn from(err: serde_json::Error) -> Self {
        SfVaultError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SfVaultError {
    fn from(err: toml::de::Error) -> Self {
        SfVaultError::Configuration(format!("TOML parse error: {err}"))
    }
}
