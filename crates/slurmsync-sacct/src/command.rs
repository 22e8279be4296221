//! The administrative command seam and its subprocess implementation.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use slurmsync_core::{SyncError, SyncResult};

/// One `sacctmgr` invocation: arguments in, stdout out.
///
/// The narrow seam keeps the snapshot and mutation logic testable without a
/// scheduler installation.
#[async_trait]
pub trait AdminCommandRunner: Send + Sync {
    /// Run the command and return its stdout on success.
    async fn run(&self, args: &[String]) -> SyncResult<String>;
}

/// Runs the real `sacctmgr` binary as a subprocess.
///
/// Arguments are passed as a list, never through a shell.
#[derive(Debug, Clone)]
pub struct SacctmgrProcess {
    binary: String,
}

impl SacctmgrProcess {
    /// Create a runner for the given `sacctmgr` path.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for SacctmgrProcess {
    fn default() -> Self {
        Self::new("sacctmgr")
    }
}

#[async_trait]
impl AdminCommandRunner for SacctmgrProcess {
    #[instrument(skip(self, args), fields(binary = %self.binary))]
    async fn run(&self, args: &[String]) -> SyncResult<String> {
        let command_line = format_command(&self.binary, args);
        debug!(command = %command_line, "running administrative command");

        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .await
            .map_err(|e| SyncError::command_failed(command_line.clone(), e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SyncError::command_failed(
                command_line,
                format!("{}: {}", output.status, stderr.trim()),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Render the command line for error messages and logs.
pub(crate) fn format_command(binary: &str, args: &[String]) -> String {
    let mut line = String::from(binary);
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}
