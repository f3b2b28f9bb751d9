//! Salesforce REST and Bulk API wire models
//!
//! Only the fields sfvault reads are modelled; unknown fields are ignored.

use crate::domain::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// OAuth2 token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub instance_url: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// OAuth2 token endpoint error body
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthError {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// Error entry returned by REST endpoints on failure
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub message: String,
    #[serde(default)]
    pub error_code: Option<String>,
}

/// Error body returned by the Bulk API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkApiError {
    pub exception_code: String,
    pub exception_message: String,
}

/// One page of a SOQL query
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub total_size: u64,
    pub done: bool,
    #[serde(default)]
    pub next_records_url: Option<String>,
    #[serde(default)]
    pub records: Vec<Record>,
}

/// sObject describe result
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDescribe {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescribe>,
    #[serde(default)]
    pub child_relationships: Vec<ChildRelationshipDescribe>,
}

/// Field entry of a describe result
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescribe {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

/// Child relationship entry of a describe result
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChildRelationshipDescribe {
    #[serde(rename = "childSObject")]
    pub child_sobject: String,
    pub field: String,
    #[serde(default)]
    pub relationship_name: Option<String>,
    #[serde(default)]
    pub deprecated_and_hidden: bool,
}

/// Bulk API 1.0 job creation request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest<'a> {
    pub operation: &'a str,
    pub object: &'a str,
    pub content_type: &'a str,
}

/// Bulk API 1.0 job state change request
#[derive(Debug, Clone, Serialize)]
pub struct JobStateRequest<'a> {
    pub state: &'a str,
}

/// Bulk API 1.0 job info
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    pub id: String,
    pub state: String,
}

/// Bulk API 1.0 batch info
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchInfo {
    pub id: String,
    pub job_id: String,
    pub state: BatchState,
    #[serde(default)]
    pub state_message: Option<String>,
}

/// Bulk API 1.0 batch processing state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum BatchState {
    Queued,
    InProgress,
    Completed,
    Failed,
    NotProcessed,
}

impl BatchState {
    /// Whether polling can stop
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BatchState::Completed | BatchState::Failed | BatchState::NotProcessed
        )
    }
}

/// Per-row result entry as returned by the batch result endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct BatchResultRow {
    #[serde(default)]
    pub id: Option<String>,
    pub success: bool,
    #[serde(default)]
    pub created: bool,
    #[serde(default)]
    pub errors: Vec<Value>,
}

/// Outcome of updating one record, in submission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResult {
    pub id: Option<String>,
    pub success: bool,
    pub created: bool,
    pub errors: Vec<String>,
}

impl From<BatchResultRow> for UpdateResult {
    fn from(row: BatchResultRow) -> Self {
        let errors = row
            .errors
            .into_iter()
            .map(|e| match e {
                Value::String(s) => s,
                Value::Object(ref map) => {
                    let code = map.get("statusCode").and_then(Value::as_str);
                    let message = map.get("message").and_then(Value::as_str);
                    match (code, message) {
                        (Some(code), Some(message)) => format!("{code}: {message}"),
                        (None, Some(message)) => message.to_string(),
                        _ => e.to_string(),
                    }
                }
                other => other.to_string(),
            })
            .collect();

        Self {
            id: row.id,
            success: row.success,
            created: row.created,
            errors,
        }
    }
}
