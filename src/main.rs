//! Lead Distribution Admin Backend
//!
//! A REST backend with SQLite persistence for managing sales agents and
//! distributing uploaded lead lists across them.

mod api;
mod auth;
mod config;
mod db;
mod distribution;
mod errors;
mod ingest;
mod models;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;

/// Maximum accepted upload size in bytes.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Lead Distribution Admin Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Upload directory: {:?}", config.upload_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if the signing secret was left at its development default
    if config.jwt_secret == config::DEV_JWT_SECRET {
        tracing::warn!(
            "No token secret configured (LEADS_JWT_SECRET). Using the insecure development default!"
        );
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Uploads are staged here until the ingestion pipeline consumes them
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    // Bootstrap the admin login if the user table has none
    auth::ensure_admin_user(&repo, &config).await?;

    // Create application state
    let state = AppState {
        repo,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the secret for the auth layer
    let secret = state.config.jwt_secret.clone();

    // Every route except login requires a valid bearer token
    let protected_routes = Router::new()
        // Agents
        .route("/agents", post(api::create_agent))
        .route("/agents", get(api::list_agents))
        .route("/agents/{id}", delete(api::delete_agent))
        // Lists
        .route("/lists/upload", post(api::upload_list))
        .route("/lists", get(api::get_lists))
        .route("/lists/{id}/distribution", get(api::get_list_distribution))
        .route("/lists/{id}", delete(api::delete_list))
        // Apply bearer auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::jwt_auth_layer(secret.clone(), req, next)
        }))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    let api_routes = Router::new()
        .route("/login", post(api::login))
        .merge(protected_routes);

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
