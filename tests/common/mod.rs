//! Shared in-memory implementations of the platform and sink traits

#![allow(dead_code)]

use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Value};
use sfvault::adapters::database::{SqlSink, TableWriteResult};
use sfvault::adapters::salesforce::{FieldDescribe, ObjectDescribe, PlatformApi, UpdateResult};
use sfvault::core::schema::CATALOG_QUERY;
use sfvault::domain::{ObjectType, Record, RecordSet, Result, SalesforceError, SfVaultError};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

pub fn rows(prefix: &str, count: usize) -> Vec<Record> {
    (1..=count)
        .map(|i| {
            json!({"Id": format!("{prefix}{i:012}"), "Name": format!("Row {i}")})
                .as_object()
                .cloned()
                .unwrap()
        })
        .collect()
}

pub fn row(value: Value) -> Record {
    value.as_object().cloned().unwrap()
}

/// Org with a fixed catalog; objects listed in `broken` fail every page
#[derive(Default)]
pub struct MemoryOrg {
    catalog: Vec<String>,
    fields: HashMap<String, Vec<String>>,
    data: HashMap<String, Vec<Record>>,
    broken: HashSet<String>,
    pages: Mutex<BTreeMap<String, usize>>,
}

impl MemoryOrg {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(mut self, name: &str, fields: &[&str], mut data: Vec<Record>) -> Self {
        data.sort_by(|a, b| id(a).cmp(id(b)));
        self.catalog.push(name.to_string());
        self.fields
            .insert(name.to_string(), fields.iter().map(|f| f.to_string()).collect());
        self.data.insert(name.to_string(), data);
        self
    }

    pub fn broken(mut self, name: &str) -> Self {
        self.broken.insert(name.to_string());
        self
    }

    pub fn pages(&self, object: &str) -> usize {
        self.pages.lock().unwrap().get(object).copied().unwrap_or(0)
    }
}

fn id(row: &Record) -> &str {
    row.get("Id").and_then(Value::as_str).unwrap_or_default()
}

#[async_trait]
impl PlatformApi for MemoryOrg {
    async fn query_all(&self, soql: &str) -> Result<Vec<Record>> {
        if soql == CATALOG_QUERY {
            return Ok(self
                .catalog
                .iter()
                .map(|name| row(json!({"QualifiedApiName": name})))
                .collect());
        }

        let re = Regex::new(r"FROM (\S+)(?: WHERE Id > '([^']*)')? ORDER BY Id LIMIT (\d+)$").unwrap();
        let caps = re.captures(soql).unwrap();
        let object = caps[1].to_string();
        let cursor = caps.get(2).map(|m| m.as_str().to_string());
        let limit: usize = caps[3].parse().unwrap();

        *self.pages.lock().unwrap().entry(object.clone()).or_insert(0) += 1;

        if self.broken.contains(&object) {
            return Err(SalesforceError::ServerError {
                status: 500,
                message: "UNKNOWN_EXCEPTION".to_string(),
            }
            .into());
        }

        Ok(self.data[&object]
            .iter()
            .filter(|r| cursor.as_deref().map_or(true, |c| id(r) > c))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn describe(&self, object: &ObjectType) -> Result<ObjectDescribe> {
        let fields = self.fields.get(object.as_str()).ok_or_else(|| {
            SfVaultError::from(SalesforceError::DescribeFailed {
                object: object.to_string(),
                message: "404 - NOT_FOUND".to_string(),
            })
        })?;

        Ok(ObjectDescribe {
            name: object.to_string(),
            fields: fields
                .iter()
                .map(|name| FieldDescribe {
                    name: name.clone(),
                    field_type: None,
                    label: None,
                })
                .collect(),
            child_relationships: vec![],
        })
    }

    async fn bulk_update(&self, _object: &ObjectType, rows: &[Record]) -> Result<Vec<UpdateResult>> {
        Ok(rows
            .iter()
            .map(|r| UpdateResult {
                id: Some(id(r).to_string()),
                success: true,
                created: false,
                errors: vec![],
            })
            .collect())
    }

    fn instance_url(&self) -> &str {
        "https://memory.my.salesforce.com"
    }
}

/// Sink keeping the latest record set per `schema.table`
#[derive(Default)]
pub struct MemorySink {
    tables: Mutex<HashMap<String, RecordSet>>,
    schemas: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self, qualified: &str) -> Option<RecordSet> {
        self.tables.lock().unwrap().get(qualified).cloned()
    }

    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.lock().unwrap().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn schemas(&self) -> Vec<String> {
        self.schemas.lock().unwrap().clone()
    }
}

#[async_trait]
impl SqlSink for MemorySink {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn ensure_schema_exists(&self, schema: &str) -> Result<()> {
        self.schemas.lock().unwrap().push(schema.to_string());
        Ok(())
    }

    async fn write_table(
        &self,
        schema: &str,
        table: &str,
        records: &RecordSet,
    ) -> Result<TableWriteResult> {
        let key = format!("{schema}.{table}");
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
