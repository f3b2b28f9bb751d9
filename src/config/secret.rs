//! Credential handling using the secrecy crate
//!
//! Salesforce passwords, security tokens, client secrets, access tokens and the
//! PostgreSQL connection string are held as [`SecretString`]. The wrapped value is
//! zeroed on drop and its `Debug` output is redacted, so configuration structs
//! can be logged with `?config` without leaking credentials.
//!
//! # Example
//!
//! ```rust
//! use sfvault::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let token = secret_string("00Dxx0000001gPL!AR8AQ".to_string());
//! assert_eq!(token.expose_secret().as_ref(), "00Dxx0000001gPL!AR8AQ");
//! assert!(!format!("{token:?}").contains("00Dxx"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String newtype implementing the marker traits `Secret` requires
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl From<&str> for SecretValue {
    fn from(s: &str) -> Self {
        SecretValue(s.to_string())
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if the secret value starts with a prefix
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Secret string: zeroed on drop, redacted in Debug, explicit `expose_secret()`
pub type SecretString = Secret<SecretValue>;

/// Wrap a String as a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Wrap an optional String as an optional [`SecretString`]
#[inline]
pub fn secret_string_opt(value: Option<String>) -> Option<SecretString> {
    value.map(secret_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("hunter2".to_string());
        assert!(secret.expose_secret() == "hunter2");
    }

    #[test]
    fn test_secret_string_opt() {
        assert!(secret_string_opt(Some("x".to_string())).is_some());
        assert!(secret_string_opt(None).is_none());
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-data".to_string());
        let debug_output = format!("{secret:?}");
        assert!(!debug_output.contains("sensitive-data"));
    }

    #[test]
    fn test_secret_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Creds {
            password: SecretString,
        }

        let creds: Creds = toml::from_str("password = \"s3cret\"").unwrap();
        assert_eq!(creds.password.expose_secret().as_ref(), "s3cret");
    }
}
