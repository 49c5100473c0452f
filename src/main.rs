//! Chronicle Notification Backend
//!
//! Watches the external content source for newly published posts and guides
//! and fans out web-push notifications to registered browser subscriptions.

mod api;
mod auth;
mod config;
mod content;
mod errors;
mod models;
mod pipeline;
mod push;
mod registry;

use std::sync::{Arc, Mutex};

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use content::{AirtableSource, ContentSource};
use pipeline::{ContentSnapshot, Dispatcher};
use push::{HttpPushTransport, PushTransport};
use registry::SubscriptionRegistry;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SubscriptionRegistry>,
    pub snapshot: Arc<Mutex<ContentSnapshot>>,
    pub content: Arc<dyn ContentSource>,
    pub dispatcher: Dispatcher,
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

    tracing::info!("Starting Chronicle Notification Backend");
    tracing::info!(
        "Content source: {}/{}",
        config.content_api_base,
        config.content_base
    );
    tracing::info!("Push relay: {}", config.push_api_url);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn about missing credentials
    if config.cron_secret.is_none() {
        tracing::warn!(
            "No cron secret configured (CHRONICLE_CRON_SECRET). Notify endpoints are unauthenticated!"
        );
    }
    if config.content_api_key.is_none() {
        tracing::warn!("No content API key configured (CHRONICLE_CONTENT_API_KEY)");
    }
    if config.push_api_key.is_none() {
        tracing::warn!("No push relay key configured (CHRONICLE_PUSH_API_KEY)");
    }

    // Wire up external collaborators
    let content: Arc<dyn ContentSource> = Arc::new(AirtableSource::new(&config));
    let transport: Arc<dyn PushTransport> = Arc::new(HttpPushTransport::new(&config));
    let dispatcher = Dispatcher::new(transport, config.site_url.clone());

    // Create application state
    let state = AppState {
        registry: Arc::new(SubscriptionRegistry::new()),
        snapshot: Arc::new(Mutex::new(ContentSnapshot::new())),
        content,
        dispatcher,
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
    let secret = state.config.cron_secret.clone();

    // Cron/operator routes, bearer-auth gated
    let notify_routes = Router::new()
        .route("/notify/check", post(api::run_check))
        .route("/notify/broadcast", post(api::broadcast))
        .layer(middleware::from_fn(move |req, next| {
            auth::bearer_auth_layer(secret.clone(), req, next)
        }));

    // Public subscription management
    let subscription_routes = Router::new()
        .route("/subscriptions", post(api::subscribe))
        .route("/subscriptions", delete(api::unsubscribe))
        .route("/subscriptions/count", get(api::subscriber_count));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", notify_routes.merge(subscription_routes))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
