//! PostgreSQL client implementation
//!
//! This module provides the pooled client the sink writes through.

use crate::config::schema::PostgreSQLConfig;
use crate::domain::{Result, SfVaultError};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use postgres_native_tls::MakeTlsConnector;
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::config::SslMode;
use tokio_postgres::NoTls;

/// PostgreSQL client for sfvault
///
/// Wraps a deadpool connection pool. TLS is negotiated according to
/// `ssl_mode`; `require`, `verify-ca` and `verify-full` use native-tls.
pub struct PostgreSQLClient {
    /// Connection pool
    pool: Pool,

    /// Configuration
    config: PostgreSQLConfig,
}

impl PostgreSQLClient {
    /// Create a new PostgreSQL client
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string cannot be parsed, the TLS
    /// connector cannot be built, or the pool cannot be created.
    pub async fn new(config: PostgreSQLConfig) -> Result<Self> {
        let mut pg_config: tokio_postgres::Config = config
            .connection_string
            .expose_secret()
            .as_ref()
            .parse()
            .map_err(|e| {
                SfVaultError::Configuration(format!(
                    "Invalid PostgreSQL connection string: {}",
                    pg_error_message(&e)
                ))
            })?;

        pg_config.ssl_mode(ssl_mode_for(&config.ssl_mode));
        pg_config.connect_timeout(Duration::from_secs(config.connection_timeout_seconds));

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let manager = if config.requires_tls() {
            let connector = build_tls_connector(&config.ssl_mode)?;
            Manager::from_config(pg_config, connector, manager_config)
        } else {
            Manager::from_config(pg_config, NoTls, manager_config)
        };

        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .wait_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .create_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .recycle_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .runtime(deadpool_postgres::Runtime::Tokio1)
            .build()
            .map_err(|e| {
                SfVaultError::Database(format!("Failed to create connection pool: {}", e))
            })?;

        Ok(Self { pool, config })
    }

    /// Test the connection to PostgreSQL
    ///
    /// Attempts to get a connection from the pool and execute a simple query.
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| {
                SfVaultError::Connection(format!("Connection test failed: {}", pg_error_message(&e)))
            })?;

        tracing::info!(
            target = %self.connection_string_safe(),
            max_connections = self.pool_status().max_size,
            "PostgreSQL connection test successful"
        );
        Ok(())
    }

    /// Get a connection from the pool with the statement timeout applied
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be obtained.
    pub async fn get_connection(&self) -> Result<deadpool_postgres::Object> {
        let client = self.pool.get().await.map_err(|e| {
            SfVaultError::Connection(format!("Failed to get connection from pool: {}", e))
        })?;

        let timeout_query = format!(
            "SET statement_timeout = {}",
            self.config.statement_timeout_seconds * 1000
        );
        client.batch_execute(&timeout_query).await.map_err(|e| {
            SfVaultError::Database(format!(
                "Failed to set statement timeout: {}",
                pg_error_message(&e)
            ))
        })?;

        Ok(client)
    }

    /// Execute one or more statements without parameters
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails.
    pub async fn batch_execute(&self, sql: &str) -> Result<()> {
        let client = self.get_connection().await?;
        client
            .batch_execute(sql)
            .await
            .map_err(|e| {
                SfVaultError::Database(format!(
                    "Statement execution failed: {}",
                    pg_error_message(&e)
                ))
            })
    }

    /// Whether a schema with this exact name is present in `pg_namespace`
    ///
    /// Needs no privilege beyond connecting, unlike `CREATE SCHEMA`.
    pub async fn schema_exists(&self, schema: &str) -> Result<bool> {
        let client = self.get_connection().await?;
        let row = client
            .query_one(SCHEMA_EXISTS_SQL, &[&schema])
            .await
            .map_err(|e| {
                SfVaultError::Database(format!(
                    "Failed to look up schema {}: {}",
                    schema,
                    pg_error_message(&e)
                ))
            })?;
        row.try_get::<_, bool>(0).map_err(|e| {
            SfVaultError::Database(format!(
                "Failed to read schema lookup for {}: {}",
                schema,
                pg_error_message(&e)
            ))
        })
    }

    /// Get the connection string (without password)
    pub fn connection_string_safe(&self) -> String {
        redact_connection_string(self.config.connection_string.expose_secret().as_ref())
    }

    /// Get the pool statistics
    pub fn pool_status(&self) -> deadpool_postgres::Status {
        self.pool.status()
    }
}

/// Lookup used before attempting `CREATE SCHEMA`
pub const SCHEMA_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM pg_namespace WHERE nspname = $1)";

/// Render a driver error with the server's message, SQLSTATE and detail
///
/// `tokio_postgres::Error`'s own `Display` collapses server errors to
/// `db error`, hiding the reason.
pub fn pg_error_message(err: &tokio_postgres::Error) -> String {
    match err.as_db_error() {
        Some(db) => format_db_error(db.message(), db.code().code(), db.detail(), db.hint()),
        None => err.to_string(),
    }
}

/// `message (SQLSTATE code): detail; hint: hint`
pub fn format_db_error(
    message: &str,
    code: &str,
    detail: Option<&str>,
    hint: Option<&str>,
) -> String {
    let mut text = format!("{message} (SQLSTATE {code})");
    if let Some(detail) = detail.filter(|d| !d.is_empty()) {
        text.push_str(": ");
        text.push_str(detail);
    }
    if let Some(hint) = hint.filter(|h| !h.is_empty()) {
        text.push_str("; hint: ");
        text.push_str(hint);
    }
    text
}

fn ssl_mode_for(mode: &str) -> SslMode {
    match mode {
        "disable" => SslMode::Disable,
        "require" | "verify-ca" | "verify-full" => SslMode::Require,
        _ => SslMode::Prefer,
    }
}

fn build_tls_connector(mode: &str) -> Result<MakeTlsConnector> {
    let mut builder = native_tls::TlsConnector::builder();
    match mode {
        "require" => {
            builder.danger_accept_invalid_certs(true);
        }
        "verify-ca" => {
            builder.danger_accept_invalid_hostnames(true);
        }
        _ => {}
    }

    let connector = builder
        .build()
        .map_err(|e| SfVaultError::Configuration(format!("Failed to build TLS connector: {}", e)))?;

    Ok(MakeTlsConnector::new(connector))
}

/// Redact credentials from a PostgreSQL connection string
pub fn redact_connection_string(connection_string: &str) -> String {
    connection_string
        .rsplit_once('@')
        .map(|(_, host)| format!("postgresql://***@{}", host))
        .unwrap_or_else(|| "postgresql://***".to_string())
}
