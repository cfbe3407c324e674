//! Student Enrollment API Server
//!
//! Registers students, enrolls them in courses and lists them.
//! Commands go through the domain model and a unit of work; the list query
//! reads flat rows on its own connection. Uses hexagonal (ports & adapters)
//! architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post, put},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{PostgresStudentListReader, PostgresUnitOfWorkFactory};
use app::{Messages, RetryPolicy};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub messages: Arc<Messages>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Students
        .route(
            "/students",
            get(handlers::list_students).post(handlers::register),
        )
        .route(
            "/students/:id",
            put(handlers::edit_personal_info).delete(handlers::unregister),
        )
        // Enrollments
        .route("/students/:id/enrollments", post(handlers::enroll))
        .route(
            "/students/:id/enrollments/:number",
            put(handlers::transfer),
        )
        .route(
            "/students/:id/enrollments/:number/deletion",
            post(handlers::disenroll),
        )
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,enrollment_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Enrollment API...");

    // Load configuration
    let config = Config::from_env().context("DATABASE_URL must be set")?;

    // Commands and queries use separate connections
    tracing::info!("Connecting to database...");
    let commands_db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to commands database")?;
    let queries_db = Database::connect(&config.queries_database_url)
        .await
        .context("Failed to connect to queries database")?;
    tracing::info!("Database connected");

    // Create adapters
    let sessions = Arc::new(PostgresUnitOfWorkFactory::new(commands_db));
    let reader = Arc::new(PostgresStudentListReader::new(queries_db));

    let retry = RetryPolicy {
        max_attempts: config.database_retry_attempts,
        initial_backoff: config.database_retry_backoff,
        ..RetryPolicy::default()
    };

    let state = AppState {
        messages: Arc::new(Messages::new(sessions, reader, retry)),
    };
    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
