//! Configuration loading and types.

use serde::Deserialize;
use std::path::Path;

use slurmsync_connector_ldap::DirectoryConfig;

use crate::error::{CliError, CliResult};

/// Root configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory connection and group search.
    pub directory: DirectoryConfig,

    /// Accounting interface.
    #[serde(default)]
    pub accounting: AccountingConfig,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Accounting interface configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountingConfig {
    /// Path to the `sacctmgr` binary.
    #[serde(default = "default_sacctmgr_path")]
    pub sacctmgr_path: String,
}

impl Default for AccountingConfig {
    fn default() -> Self {
        Self {
            sacctmgr_path: default_sacctmgr_path(),
        }
    }
}

fn default_sacctmgr_path() -> String {
    "sacctmgr".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> CliResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CliError::Config(format!(
                "failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(content: &str) -> CliResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| CliError::Config(format!("failed to parse config: {e}")))
    }

    /// Get the configuration file path from environment or default.
    pub fn config_path() -> String {
        std::env::var("SLURMSYNC_CONFIG").unwrap_or_else(|_| "/etc/slurmsync/config.yaml".to_string())
    }

    /// Apply environment variable overrides.
    ///
    /// `SLURMSYNC_BIND_PASSWORD` overrides the directory bind password so
    /// the secret can stay out of the config file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(password) = std::env::var("SLURMSYNC_BIND_PASSWORD") {
            self.directory.bind_password = Some(password);
        }
    }

    /// Validate the loaded configuration.
    pub fn validate(&self) -> CliResult<()> {
        self.directory
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))
    }
}
