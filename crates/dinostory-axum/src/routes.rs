//! Route definitions and router construction.

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use dinostory_core::contracts::http::{SPEECH_ALIAS_ROUTE, SPEECH_ROUTE, STORY_ROUTE};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig, normalize_functions_path};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// The story and speech endpoints, relative to the functions path.
///
/// Only `POST` is routed; axum answers other methods with 405.
fn function_routes() -> Router<AppState> {
    Router::new()
        .route(STORY_ROUTE, post(handlers::story::generate))
        .route(SPEECH_ROUTE, post(handlers::speech::generate))
        .route(SPEECH_ALIAS_ROUTE, post(handlers::speech::generate))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// Create the main router with the endpoints mounted under `functions_path`.
///
/// # Path Parameter Syntax
/// Axum rejects nesting at `/`, so an empty or root functions path
/// merges the endpoints into the top-level router instead.
pub fn create_router(ctx: AxumContext, functions_path: &str, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);
    let functions = function_routes().with_state(state);
    let prefix = normalize_functions_path(functions_path);

    let router = Router::new().route("/health", get(health_check));
    let router = if prefix.is_empty() {
        router.merge(functions)
    } else {
        router.nest(&prefix, functions)
    };

    router.layer(cors).layer(TraceLayer::new_for_http())
}
