//! The reconciler: a pure function from the directory and accounting
//! snapshots to an ordered action plan.
//!
//! Ordering is deterministic: groups in directory-return order, members in
//! group-list order. Repeated runs against unchanged input produce identical
//! plans, so logs are byte-for-byte comparable between runs.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::model::{AccountingSnapshot, DirectoryGroup, GroupMember, UserRecord};

/// A member that was skipped because its reference did not resolve to a
/// login. Skipped members never produce actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedMember {
    pub group: String,
    pub dn: String,
    pub reason: String,
}

/// The ordered action plan for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilePlan {
    /// Actions in application order.
    pub actions: Vec<Action>,
    /// Members skipped due to resolution failure.
    pub skipped: Vec<SkippedMember>,
}

impl ReconcilePlan {
    /// Whether the scheduler already matches the directory.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Compute the actions needed to bring the accounting state in line with the
/// directory groups.
///
/// Every emitted action was checked against the snapshot first, so the plan
/// is idempotent: planning against an already-synced snapshot yields an
/// empty list. The check runs against an overlay of the snapshot that
/// reflects actions planned earlier in the same run, which gives:
///
/// - one action per member even when a login appears twice in one group;
/// - for a member in several groups, a create bound to the first group and a
///   default-account rebinding for each later group — last write wins.
#[must_use]
pub fn plan(groups: &[DirectoryGroup], snapshot: &AccountingSnapshot) -> ReconcilePlan {
    let mut projected = snapshot.clone();
    let mut actions = Vec::new();
    let mut skipped = Vec::new();

    for group in groups {
        if !projected.account_exists(&group.name) {
            actions.push(Action::CreateAccount {
                account: group.name.clone(),
            });
            projected.accounts.insert(group.name.clone());
        }

        for member in &group.members {
            let login = match member {
                GroupMember::Resolved { login, .. } => login,
                GroupMember::Unresolved { dn, reason } => {
                    skipped.push(SkippedMember {
                        group: group.name.clone(),
                        dn: dn.clone(),
                        reason: reason.clone(),
                    });
                    continue;
                }
            };

            match projected.users.get(login) {
                None => {
                    actions.push(Action::CreateUser {
                        login: login.clone(),
                        account: group.name.clone(),
                    });
                    projected.users.insert(
                        login.clone(),
                        UserRecord {
                            default_account: Some(group.name.clone()),
                        },
                    );
                }
                Some(record) if record.default_account.as_deref() != Some(group.name.as_str()) => {
                    actions.push(Action::SetDefaultAccount {
                        login: login.clone(),
                        account: group.name.clone(),
                    });
                    projected.users.insert(
                        login.clone(),
                        UserRecord {
                            default_account: Some(group.name.clone()),
                        },
                    );
                }
                Some(_) => {
                    // Steady state: user exists and is already associated.
                }
            }
        }
    }

    ReconcilePlan { actions, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, logins: &[&str]) -> DirectoryGroup {
        DirectoryGroup {
            name: name.to_string(),
            members: logins
                .iter()
                .map(|l| GroupMember::resolved(*l, format!("CN={l},OU=People,DC=example,DC=edu")))
                .collect(),
        }
    }

    #[test]
    fn test_empty_directory_plans_nothing() {
        let plan = plan(&[], &AccountingSnapshot::new());
        assert!(plan.is_empty());
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn test_example_scenario_in_order() {
        // slurm_bio with alice (new) and bob (exists, default=other);
        // the account itself does not exist yet.
        let groups = vec![group("slurm_bio", &["alice", "bob"])];
        let mut snapshot = AccountingSnapshot::new();
        snapshot.insert_account("other");
        snapshot.insert_user("bob", Some("other".to_string()));

        let plan = plan(&groups, &snapshot);
        assert_eq!(
            plan.actions,
            vec![
                Action::CreateAccount {
                    account: "slurm_bio".to_string()
                },
                Action::CreateUser {
                    login: "alice".to_string(),
                    account: "slurm_bio".to_string()
                },
                Action::SetDefaultAccount {
                    login: "bob".to_string(),
                    account: "slurm_bio".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_steady_state_is_empty() {
        let groups = vec![group("slurm_bio", &["alice", "bob"])];
        let mut snapshot = AccountingSnapshot::new();
        snapshot.insert_account("slurm_bio");
        snapshot.insert_user("alice", Some("slurm_bio".to_string()));
        snapshot.insert_user("bob", Some("slurm_bio".to_string()));

        assert!(plan(&groups, &snapshot).is_empty());
    }

    #[test]
    fn test_empty_group_creates_only_account() {
        let groups = vec![group("slurm_new", &[])];
        let plan = plan(&groups, &AccountingSnapshot::new());
        assert_eq!(
            plan.actions,
            vec![Action::CreateAccount {
                account: "slurm_new".to_string()
            }]
        );
    }

    #[test]
    fn test_user_without_tracked_account_gets_rebound() {
        // bob exists but belongs to no tracked account: treated as "no
        // current default account", so the rebinding applies.
        let groups = vec![group("slurm_bio", &["bob"])];
        let mut snapshot = AccountingSnapshot::new();
        snapshot.insert_account("slurm_bio");
        snapshot.insert_user("bob", None);

        let plan = plan(&groups, &snapshot);
        assert_eq!(
            plan.actions,
            vec![Action::SetDefaultAccount {
                login: "bob".to_string(),
                account: "slurm_bio".to_string()
            }]
        );
    }

    #[test]
    fn test_duplicate_member_in_one_group_yields_one_action() {
        let groups = vec![group("slurm_bio", &["alice", "alice"])];
        let plan = plan(&groups, &AccountingSnapshot::new());
        assert_eq!(
            plan.actions,
            vec![
                Action::CreateAccount {
                    account: "slurm_bio".to_string()
                },
                Action::CreateUser {
                    login: "alice".to_string(),
                    account: "slurm_bio".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_member_in_two_groups_last_write_wins() {
        let groups = vec![
            group("slurm_bio", &["alice"]),
            group("slurm_chem", &["alice"]),
        ];
        let plan = plan(&groups, &AccountingSnapshot::new());
        assert_eq!(
            plan.actions,
            vec![
                Action::CreateAccount {
                    account: "slurm_bio".to_string()
                },
                Action::CreateUser {
                    login: "alice".to_string(),
                    account: "slurm_bio".to_string()
                },
                Action::CreateAccount {
                    account: "slurm_chem".to_string()
                },
                Action::SetDefaultAccount {
                    login: "alice".to_string(),
                    account: "slurm_chem".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_unresolved_members_are_skipped_with_context() {
        let groups = vec![DirectoryGroup {
            name: "slurm_bio".to_string(),
            members: vec![
                GroupMember::unresolved("CN=ghost,DC=example,DC=edu", "no such object"),
                GroupMember::resolved("alice", "CN=alice,DC=example,DC=edu"),
            ],
        }];
        let mut snapshot = AccountingSnapshot::new();
        snapshot.insert_account("slurm_bio");

        let plan = plan(&groups, &snapshot);
        assert_eq!(
            plan.actions,
            vec![Action::CreateUser {
                login: "alice".to_string(),
                account: "slurm_bio".to_string()
            }]
        );
        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(plan.skipped[0].group, "slurm_bio");
        assert_eq!(plan.skipped[0].dn, "CN=ghost,DC=example,DC=edu");
        assert_eq!(plan.skipped[0].reason, "no such object");
    }

    #[test]
    fn test_deterministic_replanning() {
        let groups = vec![
            group("slurm_bio", &["alice", "bob"]),
            group("slurm_chem", &["carol"]),
        ];
        let snapshot = AccountingSnapshot::new();
        assert_eq!(plan(&groups, &snapshot), plan(&groups, &snapshot));
    }
}
