//! Configuration loading tests.

use std::io::Write;

use slurmsync::config::AppConfig;

fn full_yaml() -> &'static str {
    r#"
directory:
  host: dc1.example.edu
  port: 636
  use_ssl: true
  domain: example.edu
  bind_dn: cn=slurm-sync,ou=Service,dc=example,dc=edu
  bind_password: secret
  base_dn: ou=People,dc=example,dc=edu
  group_prefix: slurm_

accounting:
  sacctmgr_path: /usr/bin/sacctmgr

logging:
  level: debug
"#
}

#[test]
fn test_parse_full_config() {
    let config = AppConfig::from_yaml(full_yaml()).unwrap();

    assert_eq!(config.directory.host, "dc1.example.edu");
    assert_eq!(config.directory.port, 636);
    assert!(config.directory.use_ssl);
    assert_eq!(config.directory.group_prefix, "slurm_");
    assert_eq!(config.accounting.sacctmgr_path, "/usr/bin/sacctmgr");
    assert_eq!(config.logging.level, "debug");
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_minimal_config_applies_defaults() {
    let yaml = r#"
directory:
  host: dc1.example.edu
  domain: example.edu
  bind_dn: cn=slurm-sync,ou=Service,dc=example,dc=edu
  base_dn: ou=People,dc=example,dc=edu
"#;
    let config = AppConfig::from_yaml(yaml).unwrap();

    assert_eq!(config.directory.port, 389);
    assert_eq!(config.directory.group_prefix, "slurm_");
    assert!(config.directory.bind_password.is_none());
    assert_eq!(config.accounting.sacctmgr_path, "sacctmgr");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_invalid_yaml_is_rejected() {
    assert!(AppConfig::from_yaml("directory: [not, a, map]").is_err());
}

#[test]
fn test_missing_config_file_is_a_config_error() {
    let err = AppConfig::from_file("/nonexistent/slurmsync.yaml").unwrap_err();
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_config_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(full_yaml().as_bytes()).unwrap();

    let config = AppConfig::from_file(file.path()).unwrap();
    assert_eq!(config.directory.domain, "example.edu");
}

#[test]
fn test_env_override_sets_bind_password() {
    let yaml = r#"
directory:
  host: dc1.example.edu
  domain: example.edu
  bind_dn: cn=slurm-sync,ou=Service,dc=example,dc=edu
  base_dn: ou=People,dc=example,dc=edu
"#;
    let mut config = AppConfig::from_yaml(yaml).unwrap();
    assert!(config.directory.bind_password.is_none());

    std::env::set_var("SLURMSYNC_BIND_PASSWORD", "from-env");
    config.apply_env_overrides();
    std::env::remove_var("SLURMSYNC_BIND_PASSWORD");

    assert_eq!(config.directory.bind_password.as_deref(), Some("from-env"));
}
