//! Run summary reported to the operator at the end of a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::apply::ApplyReport;
use crate::model::DirectoryGroup;
use crate::reconcile::ReconcilePlan;

/// Summary of one sync run, sufficient for a caller to decide exit status
/// and for audit logs to reconstruct what happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Run ID.
    pub run_id: Uuid,
    /// Whether this was a preview-only run.
    pub preview: bool,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run completed.
    pub completed_at: DateTime<Utc>,
    /// Directory groups matching the reserved prefix.
    pub groups_total: u32,
    /// Members across all groups, resolvable or not.
    pub members_total: u32,
    /// Members skipped due to resolution failure.
    pub members_skipped: u32,
    /// Planned actions broken down by kind.
    pub actions_by_kind: HashMap<String, u32>,
    /// Actions attempted (equals the plan length).
    pub attempted: u32,
    /// Actions applied.
    pub applied: u32,
    /// Actions skipped due to preview mode.
    pub previewed: u32,
    /// Actions that failed to apply.
    pub failed: u32,
}

impl RunSummary {
    /// Build the summary from the run's inputs and outcomes.
    #[must_use]
    pub fn build(
        groups: &[DirectoryGroup],
        plan: &ReconcilePlan,
        report: &ApplyReport,
        started_at: DateTime<Utc>,
        preview: bool,
    ) -> Self {
        let mut actions_by_kind: HashMap<String, u32> = HashMap::new();
        for action in &plan.actions {
            *actions_by_kind.entry(action.kind().to_string()).or_insert(0) += 1;
        }

        Self {
            run_id: Uuid::new_v4(),
            preview,
            started_at,
            completed_at: Utc::now(),
            groups_total: groups.len() as u32,
            members_total: groups.iter().map(|g| g.members.len() as u32).sum(),
            members_skipped: plan.skipped.len() as u32,
            actions_by_kind,
            attempted: report.attempted,
            applied: report.applied,
            previewed: report.previewed,
            failed: report.failed,
        }
    }

    /// Whether any per-action failure was recorded.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
