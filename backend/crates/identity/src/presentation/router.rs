//! Identity Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::repository::{ActivityRepository, SessionRepository, UserRepository};
use crate::infra::mail::Mailer;
use crate::infra::postgres::PgPlannerRepository;
use crate::presentation::handlers::{self, AppState};

/// Create the identity router with the PostgreSQL repository
pub fn identity_router<M>(
    repo: PgPlannerRepository,
    mailer: M,
    config: IdentityConfig,
) -> Router
where
    M: Mailer + Send + Sync + 'static,
{
    identity_router_generic(repo, mailer, config)
}

/// Create a generic identity router for any repository implementation
pub fn identity_router_generic<R, M>(repo: R, mailer: M, config: IdentityConfig) -> Router
where
    R: UserRepository + ActivityRepository + SessionRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let state = AppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        config: Arc::new(config),
    };

    Router::new()
        .route("/login", post(handlers::login::<R, M>))
        .route("/register", post(handlers::register::<R, M>))
        .with_state(state)
}
