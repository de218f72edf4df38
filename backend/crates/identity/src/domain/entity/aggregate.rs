//! User Read Models
//!
//! Projections of a user account as returned to callers. Credential
//! material never appears here; [`super::user::User`] owns it.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::Serialize;

use crate::domain::value_object::email::Email;

/// Core account details
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub first_name: String,
    pub other_names: String,
    pub email: Email,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Account profile settings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub two_fa: bool,
}

/// Selects which projections a user lookup should load
#[derive(Debug, Clone, Copy, Default)]
pub struct UserQuery {
    pub details: bool,
    pub profile: bool,
}

impl UserQuery {
    pub fn details_and_profile() -> Self {
        Self {
            details: true,
            profile: true,
        }
    }
}

/// Composite user read model; absent sections were not requested
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAggregate {
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<UserDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

impl UserAggregate {
    /// Whether this account demands a second factor before a session
    /// may be used
    pub fn requires_two_fa(&self) -> bool {
        self.profile.as_ref().is_some_and(|p| p.two_fa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(profile: Option<Profile>) -> UserAggregate {
        UserAggregate {
            user_id: UserId::new(),
            details: None,
            profile,
        }
    }

    #[test]
    fn test_two_fa_enabled() {
        assert!(aggregate(Some(Profile { two_fa: true })).requires_two_fa());
    }

    #[test]
    fn test_two_fa_disabled() {
        assert!(!aggregate(Some(Profile { two_fa: false })).requires_two_fa());
    }

    #[test]
    fn test_missing_profile_means_no_two_fa() {
        assert!(!aggregate(None).requires_two_fa());
    }

    #[test]
    fn test_absent_sections_not_serialized() {
        let json = serde_json::to_value(aggregate(None)).unwrap();
        assert!(json.get("details").is_none());
        assert!(json.get("profile").is_none());
        assert!(json.get("userId").is_some());
    }
}
