//! Identity Backend Module
//!
//! Authentication and account-identity core of the planner service.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases (login, register) and configuration
//! - `infra/` - PostgreSQL persistence and mail transports
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration through a validating identity factory
//! - Credential verification with salted Argon2id hashes
//! - Audit trail: one activity record per checked login attempt
//! - Server-side sessions with opaque tokens and configurable expiry
//! - Conditional second-factor gating (202 when the profile requires 2FA)
//!
//! ## Security Model
//! - Salt and hash are created together, never independently
//! - Plaintext passwords live only for the single validation pass
//! - Credential mismatch and unknown user share one error kind
//! - Audit writes complete before a deny is returned

pub mod application;
pub mod domain;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::IdentityConfig;
pub use application::{LoginUseCase, RegisterUseCase};
pub use infra::postgres::PgPlannerRepository;
pub use presentation::router::identity_router;

// Re-export kernel types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
pub use kernel::response::Response;
