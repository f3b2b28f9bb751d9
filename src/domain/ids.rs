//! Domain identifier types with validation
//!
//! This module provides newtype wrappers for Salesforce schema identifiers.
//! Each type keeps object names and field names from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Salesforce object type (sObject API name) newtype wrapper
///
/// Represents a queryable entity in the platform schema, e.g. `Account` or
/// `My_Custom__c`.
///
/// # Examples
///
/// ```
/// use sfvault::domain::ids::ObjectType;
/// use std::str::FromStr;
///
/// let object = ObjectType::from_str("Account").unwrap();
/// assert_eq!(object.as_str(), "Account");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectType(String);

impl ObjectType {
    /// Creates a new ObjectType from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(ObjectType)` if the name is non-empty, `Err` otherwise
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Object type cannot be empty".to_string());
        }
        Ok(Self(name))
    }

    /// Returns the object type as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ObjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ObjectType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Field (column) name of an object type
///
/// Field order as returned by describe is significant: it becomes the
/// projection order of the SOQL query and the column order of the table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldName(String);

impl FieldName {
    /// Creates a new FieldName from a string
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Field name cannot be empty".to_string());
        }
        Ok(Self(name))
    }

    /// Returns the field name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parse a comma-separated list of object names, skipping blanks
///
/// Used for CLI and environment overrides such as `Account, Contact`.
pub fn parse_object_list(input: &str) -> Vec<ObjectType> {
    input
        .split(',')
        .filter_map(|s| ObjectType::new(s.trim()).ok())
        .collect()
}
