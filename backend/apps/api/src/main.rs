//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod settings;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::{MailNotifier, PgAccountRepository, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use course::{PgCourseRepository, course_router};
use sqlx::migrate::Migrator;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::Settings;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

static MIGRATOR: Migrator = sqlx::migrate!("../../../database/migrations");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,course=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;
    let database = settings.database.clone().with_migrator(&MIGRATOR);

    // Connect and migrate eagerly; a failure here is retried on first request
    match platform::database::shared_pool(&database).await {
        Ok(_) => tracing::info!("Connected to database"),
        Err(e) => tracing::warn!(
            error = %e,
            "Database unavailable at startup, continuing anyway"
        ),
    }

    if !settings.mailer.is_configured() {
        tracing::warn!("EMAIL_USER / EMAIL_PASSWORD not set, verification emails will not be sent");
    }
    if settings.auth.dev_endpoints_enabled {
        tracing::warn!("Development endpoints are enabled");
    }

    let notifier = MailNotifier::from_config(&settings.mailer, Arc::new(settings.auth.clone()));

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = settings
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest(
            "/api/auth",
            auth_router(
                PgAccountRepository::new(database.clone()),
                notifier,
                settings.auth.clone(),
            ),
        )
        .nest(
            "/api/courses",
            course_router(PgCourseRepository::new(database)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", settings.listen_addr);

    let listener = TcpListener::bind(settings.listen_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    platform::database::shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
