//! Session Entity
//!
//! A login session bound to the request source that created it. The
//! session identifier is an opaque token (SHA-256 of a fresh reference
//! string), not a row id, so it carries no information about the user.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use platform::client::RequestSource;
use platform::crypto::{generate_reference, hash};
use serde::Serialize;

/// Persisted login session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSession {
    pub session_id: String,
    pub user_id: UserId,
    pub platform: String,
    pub platform_details: RequestSource,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl AppSession {
    /// Mint a fresh session for `user_id` from the request source.
    ///
    /// `expiry_days` below 1 is clamped to 1 so a misconfigured value
    /// can never produce an already-expired session.
    pub fn new(user_id: UserId, source: &RequestSource, expiry_days: i64) -> Self {
        let now = Utc::now();
        Self {
            session_id: hash(&generate_reference()),
            user_id,
            platform: source.platform.clone(),
            platform_details: source.clone(),
            expires_at: now + Duration::days(expiry_days.max(1)),
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> RequestSource {
        RequestSource {
            ip: "203.0.113.9".to_string(),
            browser: "firefox".to_string(),
            version: "131.0".to_string(),
            platform: "linux".to_string(),
            referrer: "".to_string(),
        }
    }

    #[test]
    fn test_session_id_is_opaque_digest() {
        let session = AppSession::new(UserId::new(), &source(), 30);
        assert_eq!(session.session_id.len(), 64);
        assert!(session.session_id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_session_ids_are_unique() {
        let user_id = UserId::new();
        let a = AppSession::new(user_id, &source(), 30);
        let b = AppSession::new(user_id, &source(), 30);
        assert_ne!(a.session_id, b.session_id);
    }

    #[test]
    fn test_expiry_days_applied() {
        let session = AppSession::new(UserId::new(), &source(), 30);
        let lifetime = session.expires_at - session.created_at;
        assert_eq!(lifetime.num_days(), 30);
        assert!(!session.is_expired());
    }

    #[test]
    fn test_expiry_days_clamped_to_at_least_one() {
        let session = AppSession::new(UserId::new(), &source(), 0);
        assert_eq!((session.expires_at - session.created_at).num_days(), 1);
        assert!(!session.is_expired());
    }

    #[test]
    fn test_platform_copied_from_source() {
        let session = AppSession::new(UserId::new(), &source(), 30);
        assert_eq!(session.platform, "linux");
        assert_eq!(session.platform_details.browser, "firefox");
    }
}
