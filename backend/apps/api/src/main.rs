//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are the
//! feature crates' own error types.

mod config;
mod home;

use std::sync::Arc;

use anyhow::Context;
use auth::PgAuthRepository;
use auth::repository::SessionRepository;
use axum::Router;
use posts::{CloudinaryGateway, PgPostRepository};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "snapfeed_api=info,auth=info,posts=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to the database")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Migrations completed");

    // Startup cleanup: errors here should not prevent server startup
    let auth_repo = PgAuthRepository::new(pool.clone());
    match auth_repo.cleanup_expired().await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Auth session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Auth session cleanup failed, continuing anyway");
        }
    }

    let auth_config = Arc::new(config.auth);
    let media = CloudinaryGateway::new(config.cloudinary)
        .context("Failed to build the media host client")?;

    // Build router
    let app = Router::new()
        .merge(home::home_router(auth_config.clone()))
        .merge(auth::auth_router(auth_repo.clone(), auth_config.clone()))
        .merge(posts::posts_router(
            PgPostRepository::new(pool.clone()),
            media,
            auth_config.clone(),
            config.posts,
        ));
    let app = auth::with_session(app, auth_repo, auth_config).layer(TraceLayer::new_for_http());

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
