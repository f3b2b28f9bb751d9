//! In-memory platform and sink used by unit tests

use crate::adapters::database::{SqlSink, TableWriteResult};
use crate::adapters::salesforce::models::{ChildRelationshipDescribe, FieldDescribe};
use crate::adapters::salesforce::{ObjectDescribe, PlatformApi, UpdateResult};
use crate::core::schema::CATALOG_QUERY;
use crate::domain::{ObjectType, Record, RecordSet, Result, SalesforceError, SfVaultError};
use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Records `{Id, Name}` with zero-padded, Id-sortable identifiers
pub fn numbered_records(prefix: &str, count: usize) -> Vec<Record> {
    (1..=count)
        .map(|i| {
            json!({"Id": format!("{prefix}{i:012}"), "Name": format!("Name {i}")})
                .as_object()
                .cloned()
                .unwrap()
        })
        .collect()
}

pub fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap()
}

#[derive(Default)]
pub struct FakePlatform {
    catalog: Vec<String>,
    describes: HashMap<String, ObjectDescribe>,
    records: HashMap<String, Vec<Record>>,
    query_failures: HashMap<String, usize>,
    describe_failures: HashSet<String>,
    catalog_fails: bool,
    bulk_failure_call: Option<usize>,
    queries: Mutex<Vec<String>>,
    pages: Mutex<HashMap<String, usize>>,
    bulk_calls: Mutex<Vec<usize>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, name: &str, fields: &[&str], mut rows: Vec<Record>) -> Self {
        rows.sort_by(|a, b| id_of(a).cmp(id_of(b)));
        self.catalog.push(name.to_string());
        self.describes.insert(
            name.to_string(),
            ObjectDescribe {
                name: name.to_string(),
                fields: fields
                    .iter()
                    .map(|f| FieldDescribe {
                        name: f.to_string(),
                        field_type: None,
                        label: None,
                    })
                    .collect(),
                child_relationships: vec![],
            },
        );
        self.records.insert(name.to_string(), rows);
        self
    }

    pub fn with_child_relationship(
        mut self,
        parent: &str,
        child: &str,
        field: &str,
        deprecated_and_hidden: bool,
    ) -> Self {
        if let Some(describe) = self.describes.get_mut(parent) {
            describe.child_relationships.push(ChildRelationshipDescribe {
                child_sobject: child.to_string(),
                field: field.to_string(),
                relationship_name: None,
                deprecated_and_hidden,
            });
        }
        self
    }

    /// Serve `pages` pages of `object`, then fail every further page request
    pub fn failing_query_after(mut self, object: &str, pages: usize) -> Self {
        self.query_failures.insert(object.to_string(), pages);
        self
    }

    pub fn failing_describe(mut self, object: &str) -> Self {
        self.describe_failures.insert(object.to_string());
        self
    }

    pub fn failing_catalog(mut self) -> Self {
        self.catalog_fails = true;
        self
    }

    /// Fail the n-th (1-based) bulk update call
    pub fn failing_bulk_call(mut self, call: usize) -> Self {
        self.bulk_failure_call = Some(call);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn page_requests(&self, object: &str) -> usize {
        self.pages.lock().unwrap().get(object).copied().unwrap_or(0)
    }

    pub fn bulk_calls(&self) -> Vec<usize> {
        self.bulk_calls.lock().unwrap().clone()
    }
}

fn id_of(row: &Record) -> &str {
    row.get("Id").and_then(Value::as_str).unwrap_or_default()
}

#[async_trait]
impl PlatformApi for FakePlatform {
    async fn query_all(&self, soql: &str) -> Result<Vec<Record>> {
        self.queries.lock().unwrap().push(soql.to_string());

        if soql == CATALOG_QUERY {
            if self.catalog_fails {
                return Err(SalesforceError::ServerError {
                    status: 503,
                    message: "Service Unavailable".to_string(),
                }
                .into());
            }
            return Ok(self
                .catalog
                .iter()
                .map(|name| record(json!({"QualifiedApiName": name})))
                .collect());
        }

        let re = Regex::new(
            r"^SELECT (.+) FROM (\S+)(?: WHERE Id > '([^']*)')? ORDER BY Id LIMIT (\d+)$",
        )
        .unwrap();
        let caps = re
            .captures(soql)
            .ok_or_else(|| SalesforceError::QueryFailed(format!("MALFORMED_QUERY: {soql}")))?;

        let object = caps[2].to_string();
        let cursor = caps.get(3).map(|m| m.as_str().to_string());
        let limit: usize = caps[4].parse().unwrap();

        let page = {
            let mut pages = self.pages.lock().unwrap();
            let count = pages.entry(object.clone()).or_insert(0);
            *count += 1;
            *count
        };

        if let Some(&ok_pages) = self.query_failures.get(&object) {
            if page > ok_pages {
                return Err(SalesforceError::ServerError {
                    status: 500,
                    message: "UNKNOWN_EXCEPTION".to_string(),
                }
                .into());
            }
        }

        let rows = self.records.get(&object).ok_or_else(|| {
            SalesforceError::QueryFailed(format!("INVALID_TYPE: sObject type '{object}' is not supported"))
        })?;

        Ok(rows
            .iter()
            .filter(|r| cursor.as_deref().map_or(true, |c| id_of(r) > c))
            .take(limit)
            .map(|r| {
                let mut raw = record(json!({"attributes": {"type": object}}));
                raw.extend(r.clone());
                raw
            })
            .collect())
    }

    async fn describe(&self, object: &ObjectType) -> Result<ObjectDescribe> {
        if self.describe_failures.contains(object.as_str()) {
            return Err(SalesforceError::DescribeFailed {
                object: object.to_string(),
                message: "500 - UNKNOWN_EXCEPTION".to_string(),
            }
            .into());
        }

        self.describes.get(object.as_str()).cloned().ok_or_else(|| {
            SalesforceError::DescribeFailed {
                object: object.to_string(),
                message: "404 - NOT_FOUND".to_string(),
            }
            .into()
        })
    }

    async fn bulk_update(&self, object: &ObjectType, rows: &[Record]) -> Result<Vec<UpdateResult>> {
        let call = {
            let mut calls = self.bulk_calls.lock().unwrap();
            calls.push(rows.len());
            calls.len()
        };

        if self.bulk_failure_call == Some(call) {
            return Err(SalesforceError::BulkJobFailed(format!(
                "batch {call} for {object} ended as Failed"
            ))
            .into());
        }

        Ok(rows
            .iter()
            .map(|row| {
                let id = id_of(row).to_string();
                let success = !id.starts_with("bad");
                UpdateResult {
                    errors: if success {
                        vec![]
                    } else {
                        vec!["ENTITY_IS_DELETED: entity is deleted".to_string()]
                    },
                    id: Some(id),
                    success,
                    created: false,
                }
            })
            .collect())
    }

    fn instance_url(&self) -> &str {
        "https://fake.my.salesforce.com"
    }
}

#[derive(Default)]
pub struct FakeSink {
    tables: Mutex<HashMap<String, RecordSet>>,
    writes: Mutex<Vec<String>>,
    failing: HashSet<String>,
    schema_denied: bool,
}

impl FakeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_table(mut self, table: &str) -> Self {
        self.failing.insert(table.to_string());
        self
    }

    /// `ensure_schema_exists` fails as for a role without CREATE on the database
    pub fn failing_schema(mut self) -> Self {
        self.schema_denied = true;
        self
    }

    pub fn table(&self, schema: &str, table: &str) -> Option<RecordSet> {
        self.tables
            .lock()
            .unwrap()
            .get(&format!("{schema}.{table}"))
            .cloned()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl SqlSink for FakeSink {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn ensure_schema_exists(&self, schema: &str) -> Result<()> {
        if self.schema_denied {
            return Err(SfVaultError::Database(format!(
                "Statement execution failed: permission denied for database \
                 (SQLSTATE 42501) creating schema {schema}"
            )));
        }
        Ok(())
    }

    async fn write_table(
        &self,
        schema: &str,
        table: &str,
        records: &RecordSet,
    ) -> Result<TableWriteResult> {
        let key = format!("{schema}.{table}");
        self.writes.lock().unwrap().push(key.clone());

        if self.failing.contains(table) {
            return Err(SfVaultError::Database(format!(
                "Failed to insert rows for {key}: value too long"
            )));
        }

        self.tables.lock().unwrap().insert(key.clone(), records.clone());
        Ok(TableWriteResult {
            table: key,
            rows_written: records.len() as u64,
            insert_statements: usize::from(!records.is_empty()),
        })
    }

    fn target_description(&self) -> String {
        "memory".to_string()
    }
}
