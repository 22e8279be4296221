//! CLI error types and exit codes

use slurmsync_core::SyncError;
use thiserror::Error;

/// Exit codes:
/// - 0: run completed (per-action failures are logged, not fatal)
/// - 1: configuration error, or partial failure with --fail-on-errors
/// - 2: directory connection/authentication failure
/// - 3: accounting snapshot failure
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Directory error: {0}")]
    Directory(SyncError),

    #[error("Accounting error: {0}")]
    Snapshot(SyncError),

    #[error("{failed} of {attempted} actions failed to apply")]
    PartialFailure { failed: u32, attempted: u32 },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 1,
            CliError::Directory(_) => 2,
            CliError::Snapshot(_) => 3,
            CliError::PartialFailure { .. } => 1,
        }
    }

    /// Print the error to stderr with appropriate formatting
    pub fn print(&self) {
        let use_color = std::env::var("NO_COLOR").is_err();

        if use_color {
            eprintln!("\x1b[31mError:\x1b[0m {}", self);
        } else {
            eprintln!("Error: {}", self);
        }

        if let Some(suggestion) = self.suggestion() {
            if use_color {
                eprintln!("\n\x1b[33mSuggestion:\x1b[0m {}", suggestion);
            } else {
                eprintln!("\nSuggestion: {}", suggestion);
            }
        }
    }

    /// Get a suggested action for this error
    fn suggestion(&self) -> Option<&'static str> {
        match self {
            CliError::Directory(SyncError::AuthenticationFailed) => {
                Some("Check the sync service-account credentials.")
            }
            CliError::Directory(_) => {
                Some("Check the directory server address and search base.")
            }
            CliError::Snapshot(_) => {
                Some("Verify sacctmgr is installed and slurmdbd is reachable.")
            }
            _ => None,
        }
    }
}
