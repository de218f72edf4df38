//! Application Layer
//!
//! Use cases orchestrating domain entities and repositories.

pub mod config;
pub mod login;
pub mod register;

pub use config::IdentityConfig;
pub use login::{LoginDetails, LoginInput, LoginUseCase};
pub use register::{RegisterUseCase, RegisteredUser};
