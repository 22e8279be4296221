//! # Sync Core
//!
//! Reconciliation core for synchronizing directory groups with the Slurm
//! accounting database.
//!
//! This crate holds everything that does not talk to the outside world:
//!
//! - the domain model (directory groups, members, the accounting snapshot)
//! - the action model (account creation, user creation, default-account
//!   rebinding)
//! - the reconciler, a pure function from two snapshots to an ordered,
//!   idempotent action plan
//! - the applier, which executes a plan against an [`AccountingSystem`]
//!   (or previews it without touching anything)
//! - the run summary reported back to the operator
//!
//! The I/O boundaries are capability traits ([`DirectorySource`],
//! [`AccountingSystem`]) implemented by the connector crates, so the
//! reconciler and applier are testable against in-memory fakes.

pub mod action;
pub mod apply;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod report;
pub mod traits;

// Re-exports
pub use action::{Action, ActionKind};
pub use apply::{apply, ActionOutcome, ActionStatus, ApplyReport};
pub use error::{SyncError, SyncResult};
pub use model::{AccountingSnapshot, DirectoryGroup, GroupMember, UserRecord};
pub use reconcile::{plan, ReconcilePlan, SkippedMember};
pub use report::RunSummary;
pub use traits::{AccountingSystem, DirectorySource};
