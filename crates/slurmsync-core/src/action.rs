//! The action model: the three idempotent mutations reconciliation can emit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One scheduler mutation, emitted only after the snapshot showed it is
/// needed. Re-planning against an already-synced snapshot emits nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Create the account mirroring a directory group.
    CreateAccount { account: String },
    /// Create a user with an initial account association.
    ///
    /// Creation implicitly sets the default account, so no separate
    /// association action follows.
    CreateUser { login: String, account: String },
    /// Rebind an existing user's default account.
    SetDefaultAccount { login: String, account: String },
}

impl Action {
    /// The kind of this action, for aggregation in the run summary.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::CreateAccount { .. } => ActionKind::CreateAccount,
            Action::CreateUser { .. } => ActionKind::CreateUser,
            Action::SetDefaultAccount { .. } => ActionKind::SetDefaultAccount,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::CreateAccount { account } => write!(f, "add account {account}"),
            Action::CreateUser { login, account } => {
                write!(f, "add user {login} with account {account}")
            }
            Action::SetDefaultAccount { login, account } => {
                write!(f, "set default account of {login} to {account}")
            }
        }
    }
}

/// Action kind, used as a stable key in summaries and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CreateAccount,
    CreateUser,
    SetDefaultAccount,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::CreateAccount => "create_account",
            ActionKind::CreateUser => "create_user",
            ActionKind::SetDefaultAccount => "set_default_account",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_display() {
        let action = Action::CreateAccount {
            account: "slurm_bio".to_string(),
        };
        assert_eq!(action.to_string(), "add account slurm_bio");

        let action = Action::CreateUser {
            login: "alice".to_string(),
            account: "slurm_bio".to_string(),
        };
        assert_eq!(action.to_string(), "add user alice with account slurm_bio");

        let action = Action::SetDefaultAccount {
            login: "bob".to_string(),
            account: "slurm_bio".to_string(),
        };
        assert_eq!(
            action.to_string(),
            "set default account of bob to slurm_bio"
        );
    }

    #[test]
    fn test_action_kind() {
        let action = Action::SetDefaultAccount {
            login: "bob".to_string(),
            account: "slurm_bio".to_string(),
        };
        assert_eq!(action.kind(), ActionKind::SetDefaultAccount);
        assert_eq!(action.kind().to_string(), "set_default_account");
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::CreateUser {
            login: "alice".to_string(),
            account: "slurm_bio".to_string(),
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"type\":\"create_user\""));
        let parsed: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, action);
    }
}
