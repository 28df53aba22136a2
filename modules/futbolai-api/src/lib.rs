pub mod analysis;
pub mod classifier;
pub mod deps;
pub mod highlights;
pub mod knowledge;
pub mod rest;

use std::sync::Arc;

use axum::{routing::get, Router};

use deps::AppState;

/// Build the service router. Kept separate from `main` so integration
/// tests can drive it with `tower::ServiceExt::oneshot`.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // REST API
        .route("/api/ai", get(rest::api_ai))
        .route("/api/movies", get(rest::api_movies))
        .with_state(state)
        // CORS (also answers OPTIONS preflight)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}
