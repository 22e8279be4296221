//! Directory connector implementation
//!
//! Implements the [`DirectorySource`] trait over an LDAP/Active Directory
//! connection.

use async_trait::async_trait;
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, Scope, SearchEntry};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use slurmsync_core::{DirectoryGroup, DirectorySource, SyncError, SyncResult};

use crate::config::DirectoryConfig;
use crate::resolve::resolve_member;

/// Directory connector for reading `slurm_*` groups and their members.
pub struct DirectoryConnector {
    /// Configuration.
    config: DirectoryConfig,

    /// Cached LDAP connection (lazily initialized).
    connection: Arc<RwLock<Option<Ldap>>>,
}

impl DirectoryConnector {
    /// Create a new connector with the given configuration.
    pub fn new(config: DirectoryConfig) -> SyncResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            connection: Arc::new(RwLock::new(None)),
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Test connectivity and credentials with a bind, without searching.
    pub async fn test_connection(&self) -> SyncResult<()> {
        self.get_connection().await.map(|_| ())
    }

    /// Close the cached connection.
    pub async fn dispose(&self) {
        let mut guard = self.connection.write().await;
        if let Some(mut ldap) = guard.take() {
            if let Err(e) = ldap.unbind().await {
                debug!(error = %e, "LDAP unbind failed");
            }
        }
    }

    /// Get an LDAP connection, creating one if necessary.
    async fn get_connection(&self) -> SyncResult<Ldap> {
        {
            let guard = self.connection.read().await;
            if let Some(ref conn) = *guard {
                return Ok(conn.clone());
            }
        }

        let conn = self.create_connection().await?;

        {
            let mut guard = self.connection.write().await;
            *guard = Some(conn.clone());
        }

        Ok(conn)
    }

    /// Create a new LDAP connection and bind as the service account.
    async fn create_connection(&self) -> SyncResult<Ldap> {
        let url = self.config.url();

        debug!(url = %url, "connecting to directory server");

        let settings = LdapConnSettings::new()
            .set_conn_timeout(std::time::Duration::from_secs(
                self.config.connection_timeout_secs,
            ))
            .set_starttls(self.config.use_starttls);

        let (conn, mut ldap) = LdapConnAsync::with_settings(settings, &url)
            .await
            .map_err(|e| {
                SyncError::connection_failed_with_source(
                    format!("failed to connect to directory server at {url}"),
                    e,
                )
            })?;

        // Spawn the connection driver
        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                warn!(error = %e, "LDAP connection driver error");
            }
        });

        let bind_dn = &self.config.bind_dn;
        let bind_password = self.config.bind_password.as_deref().unwrap_or("");

        debug!(bind_dn = %bind_dn, "performing LDAP bind");

        let result = ldap.simple_bind(bind_dn, bind_password).await.map_err(|e| {
            SyncError::connection_failed_with_source(format!("LDAP bind failed for {bind_dn}"), e)
        })?;

        if result.rc != 0 {
            // 49 = invalidCredentials
            if result.rc == 49 {
                return Err(SyncError::AuthenticationFailed);
            }
            return Err(SyncError::connection_failed(format!(
                "LDAP bind failed with code {}: {}",
                result.rc, result.text
            )));
        }

        info!(host = %self.config.host, "directory connection established");

        Ok(ldap)
    }

    /// The group search filter for the configured prefix.
    fn group_filter(&self) -> String {
        format!("(cn={}*)", escape_filter_value(&self.config.group_prefix))
    }
}

/// Escape special characters in LDAP filter values (RFC 4515).
fn escape_filter_value(value: &str) -> String {
    value
        .replace('\\', "\\5c")
        .replace('*', "\\2a")
        .replace('(', "\\28")
        .replace(')', "\\29")
        .replace('\0', "\\00")
}

#[async_trait]
impl DirectorySource for DirectoryConnector {
    #[instrument(skip(self), fields(base_dn = %self.config.base_dn, prefix = %self.config.group_prefix))]
    async fn fetch_groups(&self) -> SyncResult<Vec<DirectoryGroup>> {
        let mut ldap = self.get_connection().await?;
        let filter = self.group_filter();

        let (entries, _res) = ldap
            .search(
                &self.config.base_dn,
                Scope::Subtree,
                &filter,
                vec!["cn", "member", "sAMAccountName"],
            )
            .await
            .map_err(|e| {
                SyncError::connection_failed_with_source(
                    format!("group search failed under {}", self.config.base_dn),
                    e,
                )
            })?
            .success()
            .map_err(|e| {
                SyncError::connection_failed_with_source(
                    format!("group search failed under {}", self.config.base_dn),
                    e,
                )
            })?;

        let mut groups = Vec::with_capacity(entries.len());

        for entry in entries {
            let entry = SearchEntry::construct(entry);

            let Some(name) = entry.attrs.get("cn").and_then(|values| values.first()) else {
                warn!(dn = %entry.dn, "group entry has no cn, skipping");
                continue;
            };

            let member_dns = entry.attrs.get("member").cloned().unwrap_or_default();
            let mut members = Vec::with_capacity(member_dns.len());
            for dn in &member_dns {
                members.push(resolve_member(&mut ldap, dn).await);
            }

            debug!(group = %name, members = members.len(), "directory group read");

            groups.push(DirectoryGroup {
                name: name.clone(),
                members,
            });
        }

        info!(groups = groups.len(), "directory groups fetched");

        Ok(groups)
    }
}
