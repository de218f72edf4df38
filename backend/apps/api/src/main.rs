//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use axum::{
    Router, http,
    http::{Method, header},
};
use identity::infra::mail::{MailConfig, SendGridMailer, SmtpConfig, SmtpMailer};
use identity::{IdentityConfig, PgPlannerRepository, identity_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,identity=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: remove expired sessions
    // Errors here should not prevent server startup
    let repo = PgPlannerRepository::new(pool.clone());
    match repo.cleanup_expired().await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
        }
    }

    // Identity configuration
    let session_expiry_days = env::var("SESSION_EXPIRES")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(30);

    let identity_config = IdentityConfig {
        session_expiry_days,
        ..IdentityConfig::default()
    };

    // Mail configuration
    let mail_config = MailConfig {
        from_email: env::var("MAIL_FROM_EMAIL")
            .unwrap_or_else(|_| "noreply@localhost".to_string()),
        from_name: env::var("MAIL_FROM_NAME").unwrap_or_else(|_| "Planner".to_string()),
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Mail transport is chosen at startup; both branches yield a Router
    let auth_router = match env::var("MAIL_TRANSPORT").as_deref() {
        Ok("sendgrid") => {
            let api_key =
                env::var("SENDGRID_API_KEY").expect("SENDGRID_API_KEY must be set for sendgrid");
            identity_router(
                repo,
                SendGridMailer::new(mail_config, api_key),
                identity_config,
            )
        }
        _ => {
            let smtp = SmtpConfig {
                host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
                port: env::var("SMTP_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(587),
                username: env::var("SMTP_USERNAME").unwrap_or_default(),
                password: env::var("SMTP_PASSWORD").unwrap_or_default(),
                starttls: env::var("SMTP_STARTTLS")
                    .map(|v| v != "false")
                    .unwrap_or(true),
                timeout_secs: 30,
            };
            identity_router(repo, SmtpMailer::new(mail_config, smtp), identity_config)
        }
    };

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_router)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
