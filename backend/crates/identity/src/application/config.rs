//! Application Configuration
//!
//! Configuration for the identity application layer.

use platform::password::{KdfCost, PasswordPolicy};

/// Identity application configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Session lifetime in days (values below 1 are clamped to 1)
    pub session_expiry_days: i64,
    /// Password acceptance rules for registration
    pub password_policy: PasswordPolicy,
    /// Key derivation cost for password hashing
    pub kdf_cost: KdfCost,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            session_expiry_days: 30,
            password_policy: PasswordPolicy::default(),
            kdf_cost: KdfCost::default(),
        }
    }
}

impl IdentityConfig {
    /// Config with cheap key derivation, for tests only
    pub fn insecure_fast() -> Self {
        Self {
            kdf_cost: KdfCost::insecure_fast(),
            ..Default::default()
        }
    }
}
