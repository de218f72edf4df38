//! HTTP Handlers
//!
//! Thin adapters between axum and the use cases. Success responses pass
//! the use-case envelope through with its own status code; errors are
//! rendered as the standard error body with the request path and method
//! filled in.

use axum::Json;
use axum::extract::{ConnectInfo, OriginalUri, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response as AxumResponse};
use std::net::SocketAddr;
use std::sync::Arc;

use kernel::error::app_error::AppError;
use kernel::response::Response;
use platform::client::extract_request_source;
use serde::Serialize;

use crate::application::config::IdentityConfig;
use crate::application::{LoginInput, LoginUseCase, RegisterUseCase};
use crate::domain::entity::user::Registration;
use crate::domain::repository::{ActivityRepository, SessionRepository, UserRepository};
use crate::infra::mail::Mailer;
use crate::presentation::dto::{LoginRequest, RegisterRequest};

/// Shared state for identity handlers
pub struct AppState<R, M>
where
    R: UserRepository + ActivityRepository + SessionRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<IdentityConfig>,
}

impl<R, M> Clone for AppState<R, M>
where
    R: UserRepository + ActivityRepository + SessionRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            mailer: self.mailer.clone(),
            config: self.config.clone(),
        }
    }
}

fn success<T: Serialize>(response: Response<T>) -> AxumResponse {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::OK);
    (status, Json(response)).into_response()
}

fn failure(err: AppError, path: &str, method: &Method) -> AxumResponse {
    if err.kind().is_system_fault() {
        tracing::error!(error = %err, path = %path, "Request failed");
    }

    let status =
        StatusCode::from_u16(err.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = err.to_body(Some(path), Some(method.as_str()));
    (status, Json(body)).into_response()
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R, M>(
    State(state): State<AppState<R, M>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<LoginRequest>,
) -> AxumResponse
where
    R: UserRepository + ActivityRepository + SessionRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let source = extract_request_source(&headers, Some(addr.ip()));

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let input = LoginInput {
        email: req.email,
        password: req.password,
    };

    match use_case.execute(input, source).await {
        Ok(response) => success(response),
        Err(err) => failure(err, uri.path(), &method),
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R, M>(
    State(state): State<AppState<R, M>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    Json(req): Json<RegisterRequest>,
) -> AxumResponse
where
    R: UserRepository + ActivityRepository + SessionRepository + Clone + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let input = Registration {
        id: None,
        first_name: req.first_name,
        other_names: req.other_names,
        email: req.email,
        phone: req.phone,
        password: req.password,
    };

    match use_case.execute(input).await {
        Ok(response) => success(response),
        Err(err) => failure(err, uri.path(), &method),
    }
}
