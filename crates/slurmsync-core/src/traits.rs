//! Capability traits for the two external systems.
//!
//! The reconciler and applier only ever see these narrow interfaces, so they
//! can be exercised against in-memory fakes without a directory server or a
//! scheduler installation.

use async_trait::async_trait;

use crate::error::SyncResult;
use crate::model::{AccountingSnapshot, DirectoryGroup};

/// Source of desired state: the directory service.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    /// Fetch the groups carrying the reserved prefix, with resolved members.
    ///
    /// Returns an empty list (not an error) when no matching groups exist.
    /// Connection or authentication failure is fatal for the run.
    async fn fetch_groups(&self) -> SyncResult<Vec<DirectoryGroup>>;
}

/// The scheduler accounting database, reached through its administrative
/// interface.
#[async_trait]
pub trait AccountingSystem: Send + Sync {
    /// Read one consistent snapshot of accounts, users, and default-account
    /// associations.
    ///
    /// A failure here aborts the run: planning against a partial snapshot
    /// could issue duplicate creates or miss associations.
    async fn snapshot(&self) -> SyncResult<AccountingSnapshot>;

    /// Create an account.
    async fn create_account(&self, account: &str) -> SyncResult<()>;

    /// Create a user with an initial account association.
    async fn create_user(&self, login: &str, account: &str) -> SyncResult<()>;

    /// Set an existing user's default account.
    async fn set_default_account(&self, login: &str, account: &str) -> SyncResult<()>;
}
