//! Sync error types
//!
//! Error definitions with fatal/per-action classification: fatal errors abort
//! the run before any action is applied, per-action errors are recorded in
//! the run report and processing continues.

use thiserror::Error;

/// Error that can occur during a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    // Fatal: no desired state can be computed without the directory.
    /// Failed to establish a connection to the directory server.
    #[error("connection failed: {message}")]
    ConnectionFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Directory bind was rejected.
    #[error("authentication failed: invalid credentials")]
    AuthenticationFailed,

    /// Configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    // Fatal: a partial accounting snapshot could produce duplicate creates
    // or missed associations, so the run aborts instead.
    /// Failed to read a consistent accounting snapshot.
    #[error("accounting snapshot failed: {message}")]
    SnapshotFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Per-action: logged and recorded, later actions are still attempted.
    /// An individual administrative command failed.
    #[error("command failed: {command}: {message}")]
    CommandFailed { command: String, message: String },

    /// Data that cannot be passed through the administrative interface.
    #[error("invalid data: {message}")]
    InvalidData { message: String },
}

impl SyncError {
    /// Check if this error aborts the whole run.
    ///
    /// Fatal errors occur before any action is applied; everything else is
    /// confined to a single action and aggregated into the run report.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SyncError::ConnectionFailed { .. }
                | SyncError::AuthenticationFailed
                | SyncError::InvalidConfiguration { .. }
                | SyncError::SnapshotFailed { .. }
        )
    }

    /// Get an error code for classification.
    pub fn error_code(&self) -> &'static str {
        match self {
            SyncError::ConnectionFailed { .. } => "CONNECTION_FAILED",
            SyncError::AuthenticationFailed => "AUTH_FAILED",
            SyncError::InvalidConfiguration { .. } => "INVALID_CONFIG",
            SyncError::SnapshotFailed { .. } => "SNAPSHOT_FAILED",
            SyncError::CommandFailed { .. } => "COMMAND_FAILED",
            SyncError::InvalidData { .. } => "INVALID_DATA",
        }
    }

    // Convenience constructors

    /// Create a connection failed error.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        SyncError::ConnectionFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection failed error with source.
    pub fn connection_failed_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SyncError::ConnectionFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        SyncError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a snapshot failed error.
    pub fn snapshot_failed(message: impl Into<String>) -> Self {
        SyncError::SnapshotFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Create a snapshot failed error with source.
    pub fn snapshot_failed_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SyncError::SnapshotFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a command failed error.
    pub fn command_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        SyncError::CommandFailed {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create an invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        SyncError::InvalidData {
            message: message.into(),
        }
    }
}

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;
