//! Repository Contracts
//!
//! Async persistence traits the application layer depends on. A single
//! backing store may implement all three; use cases stay generic over
//! each so tests can substitute in-memory fakes per concern.

use kernel::error::app_error::AppResult;
use kernel::id::UserId;

use crate::domain::entity::activity::ActivityRecord;
use crate::domain::entity::aggregate::{UserAggregate, UserQuery};
use crate::domain::entity::session::AppSession;
use crate::domain::entity::user::User;
use crate::domain::value_object::email::Email;

/// Stored credential material for one account, fetched by email.
///
/// This is the only read that surfaces hash and salt; it exists so the
/// login path never loads a full user row before the password check.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub user_id: UserId,
    pub salt: String,
    pub password_hash: String,
}

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a newly registered user
    async fn create(&self, user: &User) -> AppResult<()>;

    /// Fetch credential material by email; `None` when no account has
    /// this address
    async fn find_login_credentials(&self, email: &Email) -> AppResult<Option<LoginCredentials>>;

    /// Load the projections selected by `query` for one account
    async fn find_by_id(&self, user_id: &UserId, query: UserQuery)
    -> AppResult<Option<UserAggregate>>;

    /// Whether any account already uses this address
    async fn exists_by_email(&self, email: &Email) -> AppResult<bool>;
}

/// Audit trail repository trait
#[trait_variant::make(ActivityRepository: Send)]
pub trait LocalActivityRepository {
    /// Append one audit record
    async fn create(&self, record: &ActivityRecord) -> AppResult<()>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Persist a session and return its identifier as stored
    async fn create(&self, session: &AppSession) -> AppResult<String>;
}
