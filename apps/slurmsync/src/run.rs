//! The sync run: one pass through the pipeline.

use chrono::Utc;
use tracing::{info, warn};

use slurmsync_connector_ldap::DirectoryConnector;
use slurmsync_core::{apply, plan, AccountingSystem, DirectorySource, RunSummary};
use slurmsync_sacct::SacctClient;

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Run options from the command line.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Compute and log the plan without mutating the scheduler.
    pub dry_run: bool,
    /// Treat per-action failures as a failed run.
    pub fail_on_errors: bool,
}

/// Execute one sync run: directory fetch, accounting snapshot, reconcile,
/// apply, summary.
pub async fn execute(config: &AppConfig, opts: RunOptions) -> CliResult<RunSummary> {
    let started_at = Utc::now();

    let connector =
        DirectoryConnector::new(config.directory.clone()).map_err(CliError::Directory)?;
    connector.test_connection().await.map_err(CliError::Directory)?;

    let groups = connector.fetch_groups().await.map_err(CliError::Directory)?;
    if groups.is_empty() {
        info!(
            prefix = %config.directory.group_prefix,
            "no directory groups match the reserved prefix"
        );
    }

    let client = SacctClient::new(config.accounting.sacctmgr_path.clone());
    let snapshot = client.snapshot().await.map_err(CliError::Snapshot)?;

    let run_plan = plan(&groups, &snapshot);
    for skipped in &run_plan.skipped {
        warn!(
            group = %skipped.group,
            dn = %skipped.dn,
            reason = %skipped.reason,
            "skipping unresolved member"
        );
    }
    info!(
        actions = run_plan.actions.len(),
        skipped = run_plan.skipped.len(),
        dry_run = opts.dry_run,
        "reconciliation plan computed"
    );

    let report = apply(&client, &run_plan.actions, opts.dry_run).await;

    connector.dispose().await;

    let summary = RunSummary::build(&groups, &run_plan, &report, started_at, opts.dry_run);
    info!(
        run_id = %summary.run_id,
        attempted = summary.attempted,
        applied = summary.applied,
        previewed = summary.previewed,
        failed = summary.failed,
        "run complete"
    );

    if opts.fail_on_errors && report.has_failures() {
        return Err(CliError::PartialFailure {
            failed: report.failed,
            attempted: report.attempted,
        });
    }

    Ok(summary)
}
