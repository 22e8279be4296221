//! The applier: executes an action plan against an [`AccountingSystem`], or
//! previews it without touching anything.
//!
//! Actions are applied independently and in order. A failed action is logged
//! with the action and the underlying error, recorded in the report, and
//! does not stop the actions after it.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::action::Action;
use crate::traits::AccountingSystem;

/// What happened to one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActionStatus {
    /// The mutation was executed.
    Applied,
    /// Preview mode: recorded, not executed.
    Previewed,
    /// The mutation failed; later actions were still attempted.
    Failed { error: String },
}

/// One action together with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub action: Action,
    pub status: ActionStatus,
}

/// Outcome of applying (or previewing) a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub attempted: u32,
    pub applied: u32,
    pub previewed: u32,
    pub failed: u32,
    /// Per-action outcomes, in plan order.
    pub outcomes: Vec<ActionOutcome>,
}

impl ApplyReport {
    /// Whether any action failed to apply.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Apply the plan in order against the accounting system.
///
/// With `preview` set, every action is logged and counted but no scheduler
/// mutation happens; the action list is exactly the one apply mode would
/// execute.
pub async fn apply(system: &dyn AccountingSystem, actions: &[Action], preview: bool) -> ApplyReport {
    let mut report = ApplyReport::default();

    for action in actions {
        report.attempted += 1;

        if preview {
            info!(action = %action, "[dry-run] would apply");
            report.previewed += 1;
            report.outcomes.push(ActionOutcome {
                action: action.clone(),
                status: ActionStatus::Previewed,
            });
            continue;
        }

        let result = match action {
            Action::CreateAccount { account } => system.create_account(account).await,
            Action::CreateUser { login, account } => system.create_user(login, account).await,
            Action::SetDefaultAccount { login, account } => {
                system.set_default_account(login, account).await
            }
        };

        match result {
            Ok(()) => {
                info!(action = %action, "applied");
                report.applied += 1;
                report.outcomes.push(ActionOutcome {
                    action: action.clone(),
                    status: ActionStatus::Applied,
                });
            }
            Err(e) => {
                warn!(action = %action, error = %e, "action failed, continuing");
                report.failed += 1;
                report.outcomes.push(ActionOutcome {
                    action: action.clone(),
                    status: ActionStatus::Failed {
                        error: e.to_string(),
                    },
                });
            }
        }
    }

    report
}
