//! Directory connection configuration.

use serde::{Deserialize, Serialize};
use slurmsync_core::{SyncError, SyncResult};

/// Configuration for the directory connection and group search.
#[derive(Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Directory server hostname or IP address.
    pub host: String,

    /// Directory server port (389 for LDAP, 636 for LDAPS).
    #[serde(default = "default_ldap_port")]
    pub port: u16,

    /// Use SSL/TLS (LDAPS).
    #[serde(default)]
    pub use_ssl: bool,

    /// Use STARTTLS upgrade on plain LDAP connection.
    #[serde(default)]
    pub use_starttls: bool,

    /// AD domain name (e.g. "example.edu").
    pub domain: String,

    /// Bind DN or UPN of the sync service account.
    pub bind_dn: String,

    /// Bind password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind_password: Option<String>,

    /// Search base for group queries (e.g. "ou=People,dc=example,dc=edu").
    pub base_dn: String,

    /// Reserved group-name prefix; only groups whose `cn` starts with this
    /// are synchronized.
    #[serde(default = "default_group_prefix")]
    pub group_prefix: String,

    /// Connection timeout in seconds.
    #[serde(default = "default_connection_timeout_secs")]
    pub connection_timeout_secs: u64,
}

impl std::fmt::Debug for DirectoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("use_ssl", &self.use_ssl)
            .field("use_starttls", &self.use_starttls)
            .field("domain", &self.domain)
            .field("bind_dn", &self.bind_dn)
            .field(
                "bind_password",
                &self.bind_password.as_ref().map(|_| "***REDACTED***"),
            )
            .field("base_dn", &self.base_dn)
            .field("group_prefix", &self.group_prefix)
            .field("connection_timeout_secs", &self.connection_timeout_secs)
            .finish()
    }
}

fn default_ldap_port() -> u16 {
    389
}

fn default_group_prefix() -> String {
    "slurm_".to_string()
}

fn default_connection_timeout_secs() -> u64 {
    30
}

impl DirectoryConfig {
    /// Create a new config with required fields.
    pub fn new(
        host: impl Into<String>,
        domain: impl Into<String>,
        base_dn: impl Into<String>,
        bind_dn: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: default_ldap_port(),
            use_ssl: false,
            use_starttls: false,
            domain: domain.into(),
            bind_dn: bind_dn.into(),
            bind_password: None,
            base_dn: base_dn.into(),
            group_prefix: default_group_prefix(),
            connection_timeout_secs: default_connection_timeout_secs(),
        }
    }

    /// Set bind password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.bind_password = Some(password.into());
        self
    }

    /// Enable SSL (LDAPS).
    #[must_use]
    pub fn with_ssl(mut self) -> Self {
        self.use_ssl = true;
        self.port = 636;
        self
    }

    /// Enable STARTTLS.
    #[must_use]
    pub fn with_starttls(mut self) -> Self {
        self.use_starttls = true;
        self
    }

    /// Set the reserved group-name prefix.
    pub fn with_group_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.group_prefix = prefix.into();
        self
    }

    /// Get the LDAP URL.
    #[must_use]
    pub fn url(&self) -> String {
        let scheme = if self.use_ssl { "ldaps" } else { "ldap" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }

    /// Validate the configuration before connecting.
    pub fn validate(&self) -> SyncResult<()> {
        if self.host.is_empty() {
            return Err(SyncError::invalid_config("host is required"));
        }

        if self.domain.is_empty() {
            return Err(SyncError::invalid_config("domain is required"));
        }

        if self.bind_dn.is_empty() {
            return Err(SyncError::invalid_config("bind_dn is required"));
        }

        if self.base_dn.is_empty() {
            return Err(SyncError::invalid_config("base_dn is required"));
        }

        if self.group_prefix.is_empty() {
            return Err(SyncError::invalid_config(
                "group_prefix is required: an empty prefix would sync every group",
            ));
        }

        if self.use_ssl && self.use_starttls {
            return Err(SyncError::invalid_config(
                "cannot use both SSL and STARTTLS",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> DirectoryConfig {
        DirectoryConfig::new(
            "dc1.example.edu",
            "example.edu",
            "ou=People,dc=example,dc=edu",
            "cn=slurm-sync,ou=Service,dc=example,dc=edu",
        )
    }

    #[test]
    fn test_config_defaults() {
        let config = test_config();
        assert_eq!(config.port, 389);
        assert_eq!(config.group_prefix, "slurm_");
        assert_eq!(config.connection_timeout_secs, 30);
        assert!(!config.use_ssl);
        assert!(!config.use_starttls);
    }

    #[test]
    fn test_config_url() {
        let config = test_config();
        assert_eq!(config.url(), "ldap://dc1.example.edu:389");

        let ssl_config = test_config().with_ssl();
        assert_eq!(ssl_config.url(), "ldaps://dc1.example.edu:636");
    }

    #[test]
    fn test_config_validation() {
        assert!(test_config().validate().is_ok());

        let mut config = test_config();
        config.host = String::new();
        assert!(config.validate().is_err());

        let mut config = test_config();
        config.group_prefix = String::new();
        assert!(config.validate().is_err());

        let mut config = test_config().with_ssl();
        config.use_starttls = true;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_debug_redacts_password() {
        let config = test_config().with_password("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("***REDACTED***"));
    }

    #[test]
    fn test_config_serialization() {
        let config = test_config()
            .with_password("secret")
            .with_group_prefix("hpc_");

        let json = serde_json::to_string(&config).unwrap();
        let parsed: DirectoryConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.host, "dc1.example.edu");
        assert_eq!(parsed.group_prefix, "hpc_");
        assert_eq!(parsed.bind_password, Some("secret".to_string()));
    }

    #[test]
    fn test_config_deserialization_applies_defaults() {
        let json = r#"{
            "host": "dc1.example.edu",
            "domain": "example.edu",
            "bind_dn": "cn=slurm-sync,ou=Service,dc=example,dc=edu",
            "base_dn": "ou=People,dc=example,dc=edu"
        }"#;
        let parsed: DirectoryConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.port, 389);
        assert_eq!(parsed.group_prefix, "slurm_");
        assert!(parsed.bind_password.is_none());
    }
}
