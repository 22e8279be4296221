//! Member-reference resolution: mapping a directory member DN to a login.
//!
//! Two resolution variants exist in practice (a secondary attribute lookup,
//! and extracting a name from the reference string); both sit behind
//! [`resolve_member`] with one fallback order:
//!
//! 1. base-scoped lookup of the member entry, reading `sAMAccountName`;
//! 2. the leading `CN=` value extracted from the DN string.
//!
//! A member failing both steps is returned as [`GroupMember::Unresolved`]
//! with the reason recorded. Resolution failure is per-member and never
//! fatal — but it silently drops the member from the sync, which is why the
//! parse fallback is test-covered explicitly.

use ldap3::{Ldap, LdapError, Scope, SearchEntry};
use tracing::debug;

use slurmsync_core::GroupMember;

/// Resolve one member DN to a login.
pub async fn resolve_member(ldap: &mut Ldap, dn: &str) -> GroupMember {
    let lookup_note = match lookup_sam_account_name(ldap, dn).await {
        Ok(Some(login)) => return GroupMember::resolved(login, dn),
        Ok(None) => {
            debug!(dn = %dn, "member entry has no sAMAccountName, falling back to DN parse");
            "entry has no sAMAccountName".to_string()
        }
        Err(e) => {
            debug!(dn = %dn, error = %e, "member lookup failed, falling back to DN parse");
            format!("lookup failed: {e}")
        }
    };

    match cn_from_dn(dn) {
        Some(login) => GroupMember::resolved(login, dn),
        None => GroupMember::unresolved(dn, format!("{lookup_note}; no parsable CN in reference")),
    }
}

/// Read `sAMAccountName` from the member's own entry.
async fn lookup_sam_account_name(ldap: &mut Ldap, dn: &str) -> Result<Option<String>, LdapError> {
    let (entries, _res) = ldap
        .search(dn, Scope::Base, "(objectClass=*)", vec!["sAMAccountName"])
        .await?
        .success()?;

    Ok(entries.into_iter().next().and_then(|entry| {
        let entry = SearchEntry::construct(entry);
        entry
            .attrs
            .get("sAMAccountName")
            .and_then(|values| values.first())
            .cloned()
    }))
}

/// Extract the leading `CN=` value from a DN.
///
/// Handles the RFC 4514 escapes a directory produces in DN values: a
/// backslash followed by two hex digits decodes to that byte, a backslash
/// followed by anything else escapes that character. Returns `None` for a
/// DN that does not start with a `CN=` RDN or whose value is empty or
/// malformed.
#[must_use]
pub fn cn_from_dn(dn: &str) -> Option<String> {
    let trimmed = dn.trim_start();
    if trimmed.len() < 3 || !trimmed[..3].eq_ignore_ascii_case("cn=") {
        return None;
    }

    let rest: Vec<char> = trimmed[3..].chars().collect();
    let mut value = String::new();
    let mut i = 0;

    while i < rest.len() {
        match rest[i] {
            '\\' => {
                if i + 2 < rest.len()
                    && rest[i + 1].is_ascii_hexdigit()
                    && rest[i + 2].is_ascii_hexdigit()
                {
                    let hex: String = rest[i + 1..=i + 2].iter().collect();
                    let byte = u8::from_str_radix(&hex, 16).ok()?;
                    value.push(byte as char);
                    i += 3;
                } else if i + 1 < rest.len() {
                    value.push(rest[i + 1]);
                    i += 2;
                } else {
                    // Dangling escape at the end of the value.
                    return None;
                }
            }
            ',' => break,
            c => {
                value.push(c);
                i += 1;
            }
        }
    }

    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
