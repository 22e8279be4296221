//! The accounting client: snapshot reads and the three mutations.

use async_trait::async_trait;
use tracing::{info, instrument};

use slurmsync_core::{AccountingSnapshot, AccountingSystem, SyncError, SyncResult};

use crate::command::{AdminCommandRunner, SacctmgrProcess};
use crate::parse;

/// Accounting client implementing [`AccountingSystem`] over `sacctmgr`.
pub struct SacctClient<R = SacctmgrProcess> {
    runner: R,
}

impl SacctClient<SacctmgrProcess> {
    /// Create a client running the `sacctmgr` binary at the given path.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            runner: SacctmgrProcess::new(binary),
        }
    }
}

impl Default for SacctClient<SacctmgrProcess> {
    fn default() -> Self {
        Self {
            runner: SacctmgrProcess::default(),
        }
    }
}

impl<R: AdminCommandRunner> SacctClient<R> {
    /// Create a client over a custom command runner.
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }
}

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Reject names the administrative interface cannot round-trip.
///
/// `sacctmgr` parses `key=value` specifications and emits pipe-delimited
/// listings, so names containing those separators (or whitespace) would be
/// misread on the next snapshot.
fn validate_name(kind: &str, name: &str) -> SyncResult<()> {
    if name.is_empty() {
        return Err(SyncError::invalid_data(format!("{kind} name is empty")));
    }
    if name.contains(|c: char| c.is_whitespace() || c == '|' || c == '=') {
        return Err(SyncError::invalid_data(format!(
            "{kind} name {name:?} contains characters sacctmgr cannot represent"
        )));
    }
    Ok(())
}

#[async_trait]
impl<R: AdminCommandRunner> AccountingSystem for SacctClient<R> {
    /// Read the full accounting snapshot with two bulk queries.
    ///
    /// Both queries run back-to-back at the start of the run; a failure in
    /// either aborts the run rather than risking a plan computed from a
    /// partial snapshot.
    #[instrument(skip(self))]
    async fn snapshot(&self) -> SyncResult<AccountingSnapshot> {
        let accounts_out = self
            .runner
            .run(&args(&[
                "show",
                "account",
                "format=Account",
                "--parsable2",
                "--noheader",
            ]))
            .await
            .map_err(|e| SyncError::snapshot_failed_with_source("failed to list accounts", e))?;

        let users_out = self
            .runner
            .run(&args(&[
                "show",
                "user",
                "format=User,DefaultAccount",
                "--parsable2",
                "--noheader",
            ]))
            .await
            .map_err(|e| SyncError::snapshot_failed_with_source("failed to list users", e))?;

        let mut snapshot = AccountingSnapshot::new();
        for account in parse::single_column(&accounts_out) {
            snapshot.insert_account(account);
        }
        for (login, default_account) in parse::two_columns(&users_out) {
            snapshot.insert_user(login, default_account);
        }

        info!(
            accounts = snapshot.accounts.len(),
            users = snapshot.users.len(),
            "accounting snapshot read"
        );

        Ok(snapshot)
    }

    async fn create_account(&self, account: &str) -> SyncResult<()> {
        validate_name("account", account)?;
        self.runner
            .run(&args(&["-i", "add", "account", account]))
            .await
            .map(drop)
    }

    async fn create_user(&self, login: &str, account: &str) -> SyncResult<()> {
        validate_name("user", login)?;
        validate_name("account", account)?;
        self.runner
            .run(&args(&[
                "-i",
                "add",
                "user",
                login,
                &format!("account={account}"),
            ]))
            .await
            .map(drop)
    }

    async fn set_default_account(&self, login: &str, account: &str) -> SyncResult<()> {
        validate_name("user", login)?;
        validate_name("account", account)?;
        self.runner
            .run(&args(&[
                "-i",
                "modify",
                "user",
                "where",
                &format!("name={login}"),
                "set",
                &format!("defaultaccount={account}"),
            ]))
            .await
            .map(drop)
    }
}
