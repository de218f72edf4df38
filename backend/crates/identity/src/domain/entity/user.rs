//! User Entity and Identity Factory
//!
//! [`User`] is the persisted identity aggregate. [`User::register`] is
//! the factory that turns untrusted registration input into a validated
//! identity with salted password material. It is pure: persistence is
//! the caller's responsibility.

use chrono::{DateTime, Utc};
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::UserId;
use platform::password::{KdfCost, PasswordPolicy, generate_salt, password_encryption, validate_password};
use platform::validate::{is_phone, sanitize_string};

use crate::domain::value_object::email::Email;

/// Registration input, free-form strings from an untrusted boundary
#[derive(Debug, Clone)]
pub struct Registration {
    /// Caller-supplied identifier; a fresh one is generated when absent
    pub id: Option<UserId>,
    pub first_name: String,
    pub other_names: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

/// User identity aggregate
///
/// The identifier is immutable once assigned; hash and salt are always
/// created together. Neither Debug nor Serialize ever exposes them
/// (the struct deliberately derives neither).
#[derive(Clone)]
pub struct User {
    pub user_id: UserId,
    pub first_name: String,
    pub other_names: String,
    pub email: Email,
    pub phone: Option<String>,
    pub password_hash: String,
    pub salt: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Identity factory.
    ///
    /// Fail-fast validation, first violation wins:
    /// first name → other names → email present → email format →
    /// password present → password policy → phone format (if given).
    ///
    /// On success the password is derived into a salted hash and the
    /// plaintext is not retained.
    pub fn register(
        input: Registration,
        policy: &PasswordPolicy,
        cost: &KdfCost,
    ) -> AppResult<User> {
        let first_name = sanitize_string(&input.first_name);
        if first_name.is_empty() {
            return Err(AppError::property_required(
                "First name is required",
                "first_name",
            ));
        }

        let other_names = sanitize_string(&input.other_names);
        if other_names.is_empty() {
            return Err(AppError::property_required(
                "Other names are required",
                "other_names",
            ));
        }

        if input.email.trim().is_empty() {
            return Err(AppError::property_required(
                "Email address is required",
                "email",
            ));
        }
        let email = Email::new(&input.email)?;

        if input.password.is_empty() {
            return Err(AppError::property_required(
                "Password is required",
                "password",
            ));
        }
        validate_password(&input.password, policy)
            .map_err(|e| AppError::validation(e.to_string()))?;

        let phone = match input.phone.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(raw) => {
                if !is_phone(raw) {
                    return Err(AppError::validation("A valid phone number is required"));
                }
                Some(raw.to_string())
            }
        };

        let salt = generate_salt();
        let password_hash = password_encryption(&input.password, &salt, cost)
            .map_err(|e| AppError::database("Failed to derive password hash").with_source(e))?;

        let now = Utc::now();
        Ok(User {
            user_id: input.id.unwrap_or_default(),
            first_name,
            other_names,
            email,
            phone,
            password_hash,
            salt,
            created_at: now,
            updated_at: now,
        })
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("user_id", &self.user_id)
            .field("first_name", &self.first_name)
            .field("other_names", &self.other_names)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password_hash", &"[HASH]")
            .field("salt", &"[SALT]")
            .finish()
    }
}
