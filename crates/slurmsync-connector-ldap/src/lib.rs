//! # LDAP Directory Reader
//!
//! LDAP/Active Directory reader for directory-to-Slurm accounting sync.
//!
//! Queries the directory for groups whose `cn` carries the reserved prefix
//! and resolves each group member to a login name.
//!
//! ## Example
//!
//! ```ignore
//! use slurmsync_connector_ldap::{DirectoryConfig, DirectoryConnector};
//! use slurmsync_core::DirectorySource;
//!
//! let config = DirectoryConfig::new(
//!     "dc1.example.edu",
//!     "example.edu",
//!     "ou=People,dc=example,dc=edu",
//!     "cn=slurm-sync,ou=Service,dc=example,dc=edu",
//! )
//! .with_password("secret")
//! .with_ssl();
//!
//! let connector = DirectoryConnector::new(config)?;
//! let groups = connector.fetch_groups().await?;
//! ```

pub mod config;
pub mod connector;
pub mod resolve;

// Re-exports
pub use config::DirectoryConfig;
pub use connector::DirectoryConnector;
