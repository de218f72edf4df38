//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    activity::ActivityRecord,
    aggregate::{Profile, UserAggregate, UserDetails, UserQuery},
    session::AppSession,
    user::{Registration, User},
};
pub use repository::{
    ActivityRepository, LoginCredentials, SessionRepository, UserRepository,
};
pub use value_object::email::Email;
