//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for sfvault using clap.

pub mod commands;

use crate::config::{load_config, LoggingConfig};
use clap::{Parser, Subcommand};
use std::path::Path;

/// sfvault - Salesforce to PostgreSQL backup tool
#[derive(Parser, Debug)]
#[command(name = "sfvault")]
#[command(version, about, long_about = None)]
#[command(author = "sfvault Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "sfvault.toml", env = "SFVAULT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SFVAULT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Back up Salesforce objects into PostgreSQL tables
    Backup(commands::backup::BackupArgs),

    /// List the exportable object catalog
    ListObjects(commands::list_objects::ListObjectsArgs),

    /// Show the fields (and child relationships) of an object
    Describe(commands::describe::DescribeArgs),

    /// Bulk update records from a JSON file
    Update(commands::update::UpdateArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Log level and logging settings for this invocation
    ///
    /// When the config file loads, its `[logging]` section and
    /// `application.log_level` apply, with `--log-level` taking precedence.
    /// Otherwise logging is console-only at `--log-level` or `info`; the
    /// command itself reports why the config did not load.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        let config = match self.command {
            Commands::Init(_) => None,
            _ if Path::new(&self.config).exists() => load_config(&self.config).ok(),
            _ => None,
        };

        match config {
            Some(config) => (
                self.log_level
                    .clone()
                    .unwrap_or(config.application.log_level),
                config.logging,
            ),
            None => (
                self.log_level.clone().unwrap_or_else(|| "info".to_string()),
                LoggingConfig::console_only(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn config_file(log_dir: &Path) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[application]
log_level = "debug"

[salesforce]
auth_type = "token"
instance_url = "https://acme.my.salesforce.com"
access_token = "00D!abc"

[postgresql]
connection_string = "postgresql://u:p@localhost/db"

[logging]
local_enabled = true
local_path = "{}"
local_rotation = "never"
"#,
            log_dir.display()
        )
        .unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_cli_parse_backup() {
        let cli = Cli::parse_from(["sfvault", "backup"]);
        assert_eq!(cli.config, "sfvault.toml");
        assert!(matches!(cli.command, Commands::Backup(_)));
    }

    #[test]
    fn test_cli_parse_backup_with_overrides() {
        let cli = Cli::parse_from([
            "sfvault",
            "backup",
            "--objects",
            "Account,Contact",
            "--batch-size",
            "2000",
            "--dry-run",
            "--yes",
        ]);
        match cli.command {
            Commands::Backup(args) => {
                assert_eq!(args.objects.as_deref(), Some("Account,Contact"));
                assert_eq!(args.batch_size, Some(2000));
                assert!(args.dry_run);
                assert!(args.yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["sfvault", "--config", "custom.toml", "list-objects"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::ListObjects(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["sfvault", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_describe() {
        let cli = Cli::parse_from(["sfvault", "describe", "Account", "--relationships"]);
        match cli.command {
            Commands::Describe(args) => {
                assert_eq!(args.object, "Account");
                assert!(args.relationships);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_update() {
        let cli = Cli::parse_from(["sfvault", "update", "Contact", "--file", "rows.json"]);
        match cli.command {
            Commands::Update(args) => {
                assert_eq!(args.object, "Contact");
                assert_eq!(args.file, std::path::PathBuf::from("rows.json"));
                assert_eq!(args.batch_size, 1000);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_update_requires_file() {
        assert!(Cli::try_parse_from(["sfvault", "update", "Contact"]).is_err());
    }

    #[test]
    fn test_logging_settings_follow_config_file() {
        let log_dir = TempDir::new().unwrap();
        let file = config_file(log_dir.path());
        let path = file.path().to_str().unwrap();

        let cli = Cli::parse_from(["sfvault", "--config", path, "list-objects"]);
        let (level, logging) = cli.logging_settings();

        assert_eq!(level, "debug");
        assert!(logging.local_enabled);
        assert_eq!(logging.local_path, log_dir.path().display().to_string());
        assert_eq!(logging.local_rotation, "never");
    }

    #[test]
    fn test_logging_settings_flag_overrides_config_level() {
        let log_dir = TempDir::new().unwrap();
        let file = config_file(log_dir.path());
        let path = file.path().to_str().unwrap();

        let cli = Cli::parse_from(["sfvault", "--config", path, "--log-level", "warn", "backup"]);
        let (level, logging) = cli.logging_settings();

        assert_eq!(level, "warn");
        assert!(logging.local_enabled);
    }

    #[test]
    fn test_logging_settings_without_config_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");

        let cli = Cli::parse_from(["sfvault", "--config", missing.to_str().unwrap(), "backup"]);
        let (level, logging) = cli.logging_settings();

        assert_eq!(level, cli.log_level.clone().unwrap_or_else(|| "info".to_string()));
        assert!(!logging.local_enabled);
    }

    #[test]
    fn test_logging_settings_ignore_config_for_init() {
        let log_dir = TempDir::new().unwrap();
        let file = config_file(log_dir.path());
        let path = file.path().to_str().unwrap();

        let cli = Cli::parse_from(["sfvault", "--config", path, "init"]);
        let (_, logging) = cli.logging_settings();

        assert!(!logging.local_enabled);
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["sfvault", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
