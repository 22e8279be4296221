//! Domain model: directory groups, their members, and the accounting
//! snapshot reconciliation works against.
//!
//! Everything here is an ephemeral per-run snapshot. The directory is the
//! source of desired state, the scheduler accounting database the source of
//! applied state; nothing is persisted locally between runs.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A directory group whose name carries the reserved prefix.
///
/// The group `cn` maps 1:1 to a scheduler account name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryGroup {
    /// Group `cn` (e.g. `slurm_bio`).
    pub name: String,
    /// Members in directory-return order.
    pub members: Vec<GroupMember>,
}

impl DirectoryGroup {
    /// Create a group with no members.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Logins of the resolvable members, in group-list order.
    pub fn resolved_logins(&self) -> impl Iterator<Item = &str> {
        self.members.iter().filter_map(GroupMember::login)
    }
}

/// A group member reference, resolved to a login where possible.
///
/// Resolution failure is per-member and non-fatal: unresolved members are
/// skipped with a warning and never produce actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GroupMember {
    /// The member reference resolved to a login name.
    Resolved { login: String, dn: String },
    /// The member reference could not be resolved.
    Unresolved { dn: String, reason: String },
}

impl GroupMember {
    /// Create a resolved member.
    pub fn resolved(login: impl Into<String>, dn: impl Into<String>) -> Self {
        GroupMember::Resolved {
            login: login.into(),
            dn: dn.into(),
        }
    }

    /// Create an unresolved member with the failure reason.
    pub fn unresolved(dn: impl Into<String>, reason: impl Into<String>) -> Self {
        GroupMember::Unresolved {
            dn: dn.into(),
            reason: reason.into(),
        }
    }

    /// The login, if resolution succeeded.
    #[must_use]
    pub fn login(&self) -> Option<&str> {
        match self {
            GroupMember::Resolved { login, .. } => Some(login),
            GroupMember::Unresolved { .. } => None,
        }
    }
}

/// A scheduler user as seen in the accounting snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Current default account, if the user has one.
    ///
    /// A user belonging to no tracked account is represented as `None` and
    /// treated the same as a user whose default differs from the target.
    pub default_account: Option<String>,
}

/// One consistent snapshot of the scheduler accounting state.
///
/// Read once per run, in bulk, so existence checks never mix stale and fresh
/// answers within a single reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingSnapshot {
    /// Existing account names.
    pub accounts: HashSet<String>,
    /// Existing users by login.
    pub users: HashMap<String, UserRecord>,
}

impl AccountingSnapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an account with this name exists.
    #[must_use]
    pub fn account_exists(&self, name: &str) -> bool {
        self.accounts.contains(name)
    }

    /// Whether a user with this login exists.
    #[must_use]
    pub fn user_exists(&self, login: &str) -> bool {
        self.users.contains_key(login)
    }

    /// The user's current default account, if any.
    #[must_use]
    pub fn default_account(&self, login: &str) -> Option<&str> {
        self.users
            .get(login)?
            .default_account
            .as_deref()
    }

    /// Record an account.
    pub fn insert_account(&mut self, name: impl Into<String>) {
        self.accounts.insert(name.into());
    }

    /// Record a user with its current default account.
    pub fn insert_user(&mut self, login: impl Into<String>, default_account: Option<String>) {
        self.users
            .insert(login.into(), UserRecord { default_account });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_logins_skip_unresolved() {
        let group = DirectoryGroup {
            name: "slurm_bio".to_string(),
            members: vec![
                GroupMember::resolved("alice", "CN=alice,OU=People,DC=example,DC=edu"),
                GroupMember::unresolved("CN=ghost,DC=example,DC=edu", "no such object"),
                GroupMember::resolved("bob", "CN=bob,OU=People,DC=example,DC=edu"),
            ],
        };

        let logins: Vec<&str> = group.resolved_logins().collect();
        assert_eq!(logins, vec!["alice", "bob"]);
    }

    #[test]
    fn test_snapshot_queries() {
        let mut snapshot = AccountingSnapshot::new();
        snapshot.insert_account("slurm_bio");
        snapshot.insert_user("alice", Some("slurm_bio".to_string()));
        snapshot.insert_user("bob", None);

        assert!(snapshot.account_exists("slurm_bio"));
        assert!(!snapshot.account_exists("slurm_chem"));

        assert!(snapshot.user_exists("alice"));
        assert!(snapshot.user_exists("bob"));
        assert!(!snapshot.user_exists("carol"));

        assert_eq!(snapshot.default_account("alice"), Some("slurm_bio"));
        assert_eq!(snapshot.default_account("bob"), None);
        assert_eq!(snapshot.default_account("carol"), None);
    }

    #[test]
    fn test_member_serialization() {
        let member = GroupMember::resolved("alice", "CN=alice,DC=example,DC=edu");
        let json = serde_json::to_string(&member).unwrap();
        let parsed: GroupMember = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.login(), Some("alice"));
    }
}
