//! Login Use Case
//!
//! Authenticates a user by email and password, records the attempt in
//! the audit trail, and mints a session.
//!
//! Audit rules: requests rejected before the stored credentials were
//! consulted leave no trace; once the password check has run, exactly
//! one activity record is written whether it passed or failed. A failed
//! attempt's record must be durably written before the caller learns
//! the credentials were wrong.

use std::sync::Arc;

use kernel::error::app_error::{AppError, AppResult};
use kernel::response::Response;
use platform::client::RequestSource;
use platform::password::{MIN_PASSWORD_LENGTH, password_check};
use serde::Serialize;

use crate::application::config::IdentityConfig;
use crate::domain::entity::activity::ActivityRecord;
use crate::domain::entity::aggregate::{UserAggregate, UserQuery};
use crate::domain::entity::session::AppSession;
use crate::domain::repository::{ActivityRepository, SessionRepository, UserRepository};
use crate::domain::value_object::email::Email;

/// Login input
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output: the session token plus the caller-facing user record
#[derive(Debug, Clone, Serialize)]
pub struct LoginDetails {
    pub token: String,
    #[serde(flatten)]
    pub user: UserAggregate,
}

/// Login use case
pub struct LoginUseCase<U, A, S>
where
    U: UserRepository,
    A: ActivityRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    activity_repo: Arc<A>,
    session_repo: Arc<S>,
    config: Arc<IdentityConfig>,
}

impl<U, A, S> LoginUseCase<U, A, S>
where
    U: UserRepository,
    A: ActivityRepository,
    S: SessionRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        activity_repo: Arc<A>,
        session_repo: Arc<S>,
        config: Arc<IdentityConfig>,
    ) -> Self {
        Self {
            user_repo,
            activity_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: LoginInput,
        source: RequestSource,
    ) -> AppResult<Response<LoginDetails>> {
        if input.email.trim().is_empty() {
            return Err(AppError::property_required(
                "Email address is required",
                "email",
            ));
        }

        if input.password.is_empty() {
            return Err(AppError::property_required(
                "Password is required",
                "password",
            ));
        }

        let email = Email::new(&input.email)?;

        if input.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::validation(
                "Password should be atleast 8 characters",
            ));
        }

        let credentials = self.user_repo.find_login_credentials(&email).await?;

        let Some(credentials) = credentials else {
            tracing::warn!(reason = "invalid_credentials", "Login rejected");
            return Err(AppError::response(
                "No user was found with the provided email. Check credentials and retry",
            ));
        };

        let valid = password_check(
            &input.password,
            &credentials.salt,
            &credentials.password_hash,
            &self.config.kdf_cost,
        );

        if !valid {
            // The audit record must land before the caller hears "no"
            self.activity_repo
                .create(&ActivityRecord::login_failed(
                    credentials.user_id,
                    email.as_str(),
                ))
                .await?;

            tracing::warn!(reason = "invalid_credentials", "Login rejected");
            return Err(AppError::response("Invalid credentials. Check and retry"));
        }

        let session = AppSession::new(
            credentials.user_id,
            &source,
            self.config.session_expiry_days,
        );
        let token = self.session_repo.create(&session).await?;

        let user = self
            .user_repo
            .find_by_id(&credentials.user_id, UserQuery::details_and_profile())
            .await?
            .ok_or_else(|| AppError::database("User account could not be loaded"))?;

        self.activity_repo
            .create(&ActivityRecord::login_succeeded(
                credentials.user_id,
                email.as_str(),
            ))
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            platform = %session.platform,
            "User logged in"
        );

        let details = LoginDetails { token, user };

        if details.user.requires_two_fa() {
            return Ok(Response::accepted("2FA Verification Required", details));
        }
        Ok(Response::ok("User logged in successfully", details))
    }
}
