//! Mr Burger site backend
//!
//! Stores the editable site content as one JSON document and serves it to the page.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod reconcile;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use config::Config;
use db::{ConfigRepository, StoreStatus};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<ConfigRepository>,
    pub store_status: Arc<StoreStatus>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the admin key for the write guard
    let admin_key = state.config.admin_key.clone();

    let api_routes = Router::new()
        .route(
            "/config",
            get(api::get_config).merge(post(api::save_config).layer(middleware::from_fn(
                move |req, next| auth::admin_key_layer(admin_key.clone(), req, next),
            ))),
        )
        .route("/order-link", post(api::order_link))
        .route("/health", get(api::health_check))
        .fallback(api::api_not_found);

    let router = Router::new().nest("/api", api_routes);

    // Every other path serves the page bundle, falling back to index.html
    let static_dir = &state.config.static_dir;
    let router = if static_dir.is_dir() {
        let index = static_dir.join("index.html");
        router.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)))
    } else {
        tracing::warn!(
            "Static directory {:?} not found, serving the API only",
            static_dir
        );
        router
    };

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
