//! Activity Entity
//!
//! Audit trail records. Every authenticated-credential check on an
//! account leaves exactly one record, whether the attempt succeeded or
//! failed. Metadata never includes the submitted password.

use chrono::{DateTime, Utc};
use kernel::id::{ActivityId, UserId};
use platform::crypto::{generate_reference, md5_hex};
use serde::Serialize;
use serde_json::json;

/// A single audit record tied to a user account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub activity_id: ActivityId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub metadata: serde_json::Value,
    /// Deduplication fingerprint, unique per record
    pub hash: String,
    pub created_at: DateTime<Utc>,
}

impl ActivityRecord {
    fn new(
        user_id: UserId,
        title: &str,
        description: &str,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            activity_id: ActivityId::new(),
            user_id,
            title: title.to_string(),
            description: description.to_string(),
            metadata,
            hash: md5_hex(&generate_reference()),
            created_at: Utc::now(),
        }
    }

    /// Record a credential check that failed for an existing account
    pub fn login_failed(user_id: UserId, email: &str) -> Self {
        Self::new(
            user_id,
            "Login attempt failed",
            "A login was attempted on this account but failed.",
            Self::attempt_metadata(email),
        )
    }

    /// Record a credential check that succeeded
    pub fn login_succeeded(user_id: UserId, email: &str) -> Self {
        Self::new(
            user_id,
            "Login attempt successful",
            "A login was attempted on this account and was succesful.",
            Self::attempt_metadata(email),
        )
    }

    /// Record the creation of a new account
    pub fn account_created(user_id: UserId, email: &str) -> Self {
        Self::new(
            user_id,
            "Account created",
            "A new account was created with this email address.",
            Self::attempt_metadata(email),
        )
    }

    fn attempt_metadata(email: &str) -> serde_json::Value {
        json!({
            "email": email,
            "date": Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_attempt_record() {
        let user_id = UserId::new();
        let record = ActivityRecord::login_failed(user_id, "ada@example.com");
        assert_eq!(record.user_id, user_id);
        assert_eq!(record.title, "Login attempt failed");
        assert_eq!(record.metadata["email"], "ada@example.com");
    }

    #[test]
    fn test_successful_attempt_record() {
        let record = ActivityRecord::login_succeeded(UserId::new(), "ada@example.com");
        assert_eq!(record.title, "Login attempt successful");
    }

    #[test]
    fn test_metadata_never_carries_a_password() {
        let record = ActivityRecord::login_failed(UserId::new(), "ada@example.com");
        assert!(record.metadata.get("password").is_none());
        let keys: Vec<_> = record
            .metadata
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["date", "email"]);
    }

    #[test]
    fn test_fingerprints_are_unique() {
        let user_id = UserId::new();
        let a = ActivityRecord::login_failed(user_id, "ada@example.com");
        let b = ActivityRecord::login_failed(user_id, "ada@example.com");
        assert_ne!(a.hash, b.hash);
        assert_ne!(a.activity_id, b.activity_id);
        assert_eq!(a.hash.len(), 32);
    }
}
