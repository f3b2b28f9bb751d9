//! Schema introspection
//!
//! Lists the exportable object catalog and, per object, its fields and child
//! relationships. Nothing is cached; every call goes to the platform.

use crate::adapters::salesforce::PlatformApi;
use crate::domain::{FieldName, ObjectType, Result, SalesforceError, SfVaultError};
use serde::Serialize;
use serde_json::Value;

/// Catalog query over the entity metadata
pub const CATALOG_QUERY: &str =
    "SELECT QualifiedApiName FROM EntityDefinition WHERE DurableId != null";

/// Child relationship edge: `child_object.field` references the described object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildRelationship {
    pub child_object: ObjectType,
    pub field: FieldName,
    pub relationship_name: Option<String>,
}

/// List every exportable object type
///
/// # Errors
///
/// Propagates query failures, and returns `InvalidResponse` when a catalog row
/// carries no `QualifiedApiName`.
pub async fn list_object_types(api: &dyn PlatformApi) -> Result<Vec<ObjectType>> {
    let rows = api.query_all(CATALOG_QUERY).await?;

    let objects = rows
        .iter()
        .map(|row| {
            row.get("QualifiedApiName")
                .and_then(Value::as_str)
                .and_then(|name| ObjectType::new(name).ok())
                .ok_or_else(|| {
                    SfVaultError::from(SalesforceError::InvalidResponse(
                        "Catalog row without QualifiedApiName".to_string(),
                    ))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(objects = objects.len(), "Listed object catalog");
    Ok(objects)
}

/// List the field names of an object type in describe order
///
/// # Errors
///
/// Propagates describe failures.
pub async fn list_fields(api: &dyn PlatformApi, object: &ObjectType) -> Result<Vec<FieldName>> {
    let describe = api.describe(object).await?;

    describe
        .fields
        .into_iter()
        .map(|f| {
            FieldName::new(f.name).map_err(|e| {
                SfVaultError::from(SalesforceError::DescribeFailed {
                    object: object.to_string(),
                    message: e,
                })
            })
        })
        .collect()
}

/// List child relationships of an object type, skipping deprecated-and-hidden ones
///
/// Edges whose child object or field name is blank are skipped as well and
/// logged at debug level; one malformed edge does not fail the describe.
///
/// # Errors
///
/// Propagates describe failures.
pub async fn list_child_relationships(
    api: &dyn PlatformApi,
    object: &ObjectType,
) -> Result<Vec<ChildRelationship>> {
    let describe = api.describe(object).await?;

    let relationships = describe
        .child_relationships
        .into_iter()
        .filter(|r| !r.deprecated_and_hidden)
        .filter_map(|r| {
            match (ObjectType::new(r.child_sobject.as_str()), FieldName::new(r.field.as_str())) {
                (Ok(child_object), Ok(field)) => Some(ChildRelationship {
                    child_object,
                    field,
                    relationship_name: r.relationship_name,
                }),
                (Err(reason), _) | (_, Err(reason)) => {
                    tracing::debug!(
                        object = %object,
                        child = %r.child_sobject,
                        field = %r.field,
                        reason = %reason,
                        "Skipping malformed child relationship"
                    );
                    None
                }
            }
        })
        .collect();

    Ok(relationships)
}
