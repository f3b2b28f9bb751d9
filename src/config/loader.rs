//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{AuthType, SfVaultConfig};
use super::secret::secret_string;
use crate::domain::errors::SfVaultError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SfVaultConfig
/// 4. Applies environment variable overrides (SFVAULT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`SfVaultError::Configuration`] if the file cannot be read, a
/// referenced variable is unset, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use sfvault::config::loader::load_config;
///
/// let config = load_config("sfvault.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SfVaultConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SfVaultError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SfVaultError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: SfVaultConfig = toml::from_str(&contents)
        .map_err(|e| SfVaultError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        SfVaultError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are passed through untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
pub fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| SfVaultError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(SfVaultError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    let mut result = lines.join("\n");
    if input.ends_with('\n') {
        result.push('\n');
    }
    Ok(result)
}

/// Applies environment variable overrides using SFVAULT_* prefix
///
/// Environment variables follow the pattern: SFVAULT_<SECTION>_<KEY>
/// For example: SFVAULT_SALESFORCE_USERNAME, SFVAULT_BACKUP_BATCH_SIZE
pub fn apply_env_overrides(config: &mut SfVaultConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("SFVAULT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("SFVAULT_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_bool("SFVAULT_APPLICATION_DRY_RUN", &val)?;
    }

    // Salesforce overrides
    let sf = &mut config.salesforce;
    if let Ok(val) = std::env::var("SFVAULT_SALESFORCE_LOGIN_URL") {
        sf.login_url = val;
    }
    if let Ok(val) = std::env::var("SFVAULT_SALESFORCE_INSTANCE_URL") {
        sf.instance_url = Some(val);
    }
    if let Ok(val) = std::env::var("SFVAULT_SALESFORCE_API_VERSION") {
        sf.api_version = val;
    }
    if let Ok(val) = std::env::var("SFVAULT_SALESFORCE_AUTH_TYPE") {
        sf.auth_type = match val.to_lowercase().as_str() {
            "password" => AuthType::Password,
            "token" => AuthType::Token,
            other => {
                return Err(SfVaultError::Configuration(format!(
                    "SFVAULT_SALESFORCE_AUTH_TYPE must be 'password' or 'token', got '{other}'"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("SFVAULT_SALESFORCE_CLIENT_ID") {
        sf.client_id = Some(val);
    }
    if let Ok(val) = std::env::var("SFVAULT_SALESFORCE_CLIENT_SECRET") {
        sf.client_secret = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("SFVAULT_SALESFORCE_USERNAME") {
        sf.username = Some(val);
    }
    if let Ok(val) = std::env::var("SFVAULT_SALESFORCE_PASSWORD") {
        sf.password = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("SFVAULT_SALESFORCE_SECURITY_TOKEN") {
        sf.security_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("SFVAULT_SALESFORCE_ACCESS_TOKEN") {
        sf.access_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("SFVAULT_SALESFORCE_TLS_VERIFY") {
        sf.tls_verify = parse_bool("SFVAULT_SALESFORCE_TLS_VERIFY", &val)?;
    }
    if let Ok(val) = std::env::var("SFVAULT_SALESFORCE_TIMEOUT_SECONDS") {
        sf.timeout_seconds = parse_number("SFVAULT_SALESFORCE_TIMEOUT_SECONDS", &val)?;
    }

    // Backup overrides
    if let Ok(val) = std::env::var("SFVAULT_BACKUP_OBJECTS") {
        config.backup.objects = split_list(&val);
    }
    if let Ok(val) = std::env::var("SFVAULT_BACKUP_EXCLUDE_OBJECTS") {
        config.backup.exclude_objects = split_list(&val);
    }
    if let Ok(val) = std::env::var("SFVAULT_BACKUP_BATCH_SIZE") {
        config.backup.batch_size = parse_number("SFVAULT_BACKUP_BATCH_SIZE", &val)?;
    }
    if let Ok(val) = std::env::var("SFVAULT_BACKUP_WRITE_CHUNK_SIZE") {
        config.backup.write_chunk_size = parse_number("SFVAULT_BACKUP_WRITE_CHUNK_SIZE", &val)?;
    }

    // PostgreSQL overrides
    if let Ok(val) = std::env::var("SFVAULT_POSTGRESQL_CONNECTION_STRING") {
        config.postgresql.connection_string = secret_string(val);
    }
    if let Ok(val) = std::env::var("SFVAULT_POSTGRESQL_SCHEMA") {
        config.postgresql.schema = val;
    }
    if let Ok(val) = std::env::var("SFVAULT_POSTGRESQL_SSL_MODE") {
        config.postgresql.ssl_mode = val;
    }
    if let Ok(val) = std::env::var("SFVAULT_POSTGRESQL_MAX_CONNECTIONS") {
        config.postgresql.max_connections =
            parse_number("SFVAULT_POSTGRESQL_MAX_CONNECTIONS", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("SFVAULT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool("SFVAULT_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("SFVAULT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("SFVAULT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_bool(name: &str, val: &str) -> Result<bool> {
    val.trim().parse().map_err(|_| {
        SfVaultError::Configuration(format!("{name} must be 'true' or 'false', got '{val}'"))
    })
}

fn parse_number<T: std::str::FromStr>(name: &str, val: &str) -> Result<T> {
    val.trim().parse().map_err(|_| {
        SfVaultError::Configuration(format!("{name} must be a non-negative integer, got '{val}'"))
    })
}

fn split_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
