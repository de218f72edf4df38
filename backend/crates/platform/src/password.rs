//! Password Salting, Derivation and Verification
//!
//! NIST SP 800-63B compliant password handling with:
//! - Argon2id derivation (memory-hard, recommended by OWASP)
//! - Explicit per-user salts, generated together with every hash
//! - Zeroization of plaintext buffers
//! - Constant-time comparison
//!
//! The salt and the derived hash are stored as separate columns; the
//! derivation cost is a configuration point ([`KdfCost`]) so deployments
//! can tune it.

use argon2::{Algorithm, Argon2, Params, Version};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

use crate::crypto::{constant_time_eq, from_base64, random_bytes, to_base64};

// ============================================================================
// Constants (NIST SP 800-63B compliant)
// ============================================================================

/// Minimum password length (NIST: SHALL be at least 8)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (NIST: SHOULD permit at least 64)
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Salt length in bytes (128 bits)
pub const SALT_LENGTH: usize = 16;

/// Derived hash length in bytes
const HASH_LENGTH: usize = 32;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password contains control characters
    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Key-derivation errors
#[derive(Debug, Error)]
pub enum KdfError {
    /// Derivation failed (bad parameters)
    #[error("Password derivation failed: {0}")]
    DerivationFailed(String),

    /// Salt is not valid base64 of the expected length
    #[error("Invalid salt encoding")]
    InvalidSalt,
}

// ============================================================================
// Configuration points
// ============================================================================

/// Minimum-strength policy applied before hashing or comparison.
///
/// Length bounds are the configuration point; composition rules can be
/// layered on by adjusting these fields.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
            max_length: MAX_PASSWORD_LENGTH,
        }
    }
}

/// Tunable Argon2id cost factors.
///
/// Defaults follow the OWASP recommendation: m=19456 (19 MiB), t=2, p=1.
#[derive(Debug, Clone)]
pub struct KdfCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for KdfCost {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl KdfCost {
    /// Lightweight cost for tests; never use in production
    pub fn insecure_fast() -> Self {
        Self {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        }
    }

    fn params(&self) -> Result<Params, KdfError> {
        Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(HASH_LENGTH),
        )
        .map_err(|e| KdfError::DerivationFailed(e.to_string()))
    }
}

// ============================================================================
// Operations
// ============================================================================

/// Enforce the minimum-strength policy before a password is accepted
/// for hashing or comparison.
///
/// Unicode is normalized with NFKC and length counts code points, not
/// bytes.
pub fn validate_password(raw: &str, policy: &PasswordPolicy) -> Result<(), PasswordPolicyError> {
    let normalized: Zeroizing<String> = Zeroizing::new(raw.nfkc().collect());

    if normalized.trim().is_empty() {
        return Err(PasswordPolicyError::EmptyOrWhitespace);
    }

    let char_count = normalized.chars().count();
    if char_count < policy.min_length {
        return Err(PasswordPolicyError::TooShort {
            min: policy.min_length,
            actual: char_count,
        });
    }
    if char_count > policy.max_length {
        return Err(PasswordPolicyError::TooLong {
            max: policy.max_length,
            actual: char_count,
        });
    }

    for ch in normalized.chars() {
        if ch.is_control() && ch != ' ' && ch != '\t' {
            return Err(PasswordPolicyError::InvalidCharacter);
        }
    }

    Ok(())
}

/// Generate a fresh random salt, base64-encoded.
///
/// 128 bits from the OS RNG; unique per call with overwhelming
/// probability. A salt is only ever created together with the hash it
/// belongs to.
pub fn generate_salt() -> String {
    to_base64(&random_bytes(SALT_LENGTH))
}

/// Derive a one-way Argon2id hash from a plaintext password and salt.
///
/// The plaintext is NFKC-normalized and the working buffer zeroized
/// after use. The result is base64 of the raw derived key; it cannot be
/// reversed.
pub fn password_encryption(password: &str, salt: &str, cost: &KdfCost) -> Result<String, KdfError> {
    let salt_bytes = from_base64(salt).map_err(|_| KdfError::InvalidSalt)?;
    if salt_bytes.len() != SALT_LENGTH {
        return Err(KdfError::InvalidSalt);
    }

    let normalized: Zeroizing<String> = Zeroizing::new(password.nfkc().collect());

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, cost.params()?);
    let mut out = Zeroizing::new([0u8; HASH_LENGTH]);
    argon2
        .hash_password_into(normalized.as_bytes(), &salt_bytes, out.as_mut())
        .map_err(|e| KdfError::DerivationFailed(e.to_string()))?;

    Ok(to_base64(out.as_ref()))
}

/// Recompute the derived hash and compare against the stored one in
/// constant time.
///
/// Returns `false` on mismatch or on any malformed input; never errors.
pub fn password_check(password: &str, salt: &str, stored_hash: &str, cost: &KdfCost) -> bool {
    let Ok(computed) = password_encryption(password, salt, cost) else {
        return false;
    };
    let (Ok(computed_bytes), Ok(stored_bytes)) = (from_base64(&computed), from_base64(stored_hash))
    else {
        return false;
    };
    constant_time_eq(&computed_bytes, &stored_bytes)
}
