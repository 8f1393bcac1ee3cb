//! Registered account record.
//!
//! # Responsibility
//! - Define the record stored in the persisted account slot.
//! - Provide the case-insensitive email identity helpers.
//!
//! # Invariants
//! - At most one account per case-folded email inside one slot.
//! - `registered_at` is never rewritten after creation.
//! - Field names on the wire are `email`, `password`, `name`, `registeredAt`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One account as persisted in the registry slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredAccount {
    /// Email as entered at signup; identity comparisons ignore case.
    pub email: String,
    /// Argon2 PHC string for new records, plaintext for legacy ones.
    pub password: String,
    /// Display name. Older slots may omit it.
    #[serde(default)]
    pub name: String,
    /// Serialized as an RFC 3339 / ISO-8601 string.
    #[serde(rename = "registeredAt")]
    pub registered_at: DateTime<Utc>,
}

impl RegisteredAccount {
    /// Returns whether this account is identified by `email`, ignoring case.
    pub fn matches_email(&self, email: &str) -> bool {
        email_key(&self.email) == email_key(email)
    }
}

/// Signup input before the registry stamps and stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl NewAccount {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
        }
    }
}

/// Case-folded identity key for an email address.
pub fn email_key(email: &str) -> String {
    email.to_lowercase()
}

/// Masks the local part of an email for log output.
///
/// `alice@example.com` becomes `a***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{first}***@{domain}")
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{mask_email, RegisteredAccount};
    use chrono::{TimeZone, Utc};

    fn account(email: &str) -> RegisteredAccount {
        RegisteredAccount {
            email: email.to_string(),
            password: "secret".to_string(),
            name: "Alice".to_string(),
            registered_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn matches_email_ignores_case() {
        let record = account("Foo@Bar.com");
        assert!(record.matches_email("foo@bar.com"));
        assert!(record.matches_email("FOO@BAR.COM"));
        assert!(!record.matches_email("foo@bar.co"));
    }

    #[test]
    fn mask_email_keeps_only_first_char_and_domain() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
