//! # sacctmgr Client
//!
//! Slurm accounting client for directory-to-Slurm accounting sync.
//!
//! Talks to the accounting database exclusively through discrete `sacctmgr`
//! invocations: bulk `show` queries build the run's snapshot, and the three
//! mutations (`add account`, `add user`, `modify user`) realize the actions
//! the reconciler emits. The subprocess sits behind the
//! [`AdminCommandRunner`] seam so everything above it is testable with a
//! recording fake.

pub mod client;
pub mod command;
pub mod parse;

// Re-exports
pub use client::SacctClient;
pub use command::{AdminCommandRunner, SacctmgrProcess};
