//! Route definitions and router construction.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AppContext, CorsConfig};
use crate::error::panic_response;
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

/// API routes without the `/api` prefix (nested by [`create_router`]).
///
/// Wrong methods get a JSON `405` rather than axum's empty one.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(handlers::chat::chat))
        .method_not_allowed_fallback(handlers::chat::method_not_allowed)
}

/// Create the main Axum router.
///
/// With `static_dir`, `GET /` serves its `index.html` and unmatched paths
/// fall back to files in the directory. Without it, `GET /` returns a
/// status payload.
pub fn create_router(ctx: AppContext, static_dir: Option<&Path>) -> Router {
    let cors = build_cors_layer(&CorsConfig::from_relay(&ctx.config));
    let state: AppState = Arc::new(ctx);

    let router = Router::new()
        .route("/health", get(handlers::system::health))
        .nest("/api", api_routes().layer(cors));

    let router = match static_dir {
        Some(dir) => with_static_assets(router, dir),
        None => router
            .route("/", get(handlers::system::root))
            .route("/favicon.ico", get(handlers::system::favicon)),
    };

    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the front-end from `dir`: `index.html` at `/`, other files as fallback.
fn with_static_assets(router: Router<AppState>, dir: &Path) -> Router<AppState> {
    let favicon = dir.join("favicon.ico");
    let router = if favicon.is_file() {
        router.route_service("/favicon.ico", ServeFile::new(favicon))
    } else {
        router.route("/favicon.ico", get(handlers::system::favicon))
    };

    router
        .route_service("/", ServeFile::new(dir.join("index.html")))
        .fallback_service(ServeDir::new(dir))
}
