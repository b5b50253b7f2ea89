//! API Routes
//!
//! Configures the Axum router with all page service endpoints.

use axum::{
    routing::{delete, get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, invalidate_handler, page_handler, publish_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /v1/page/:name` - Rendered page (cached)
/// - `PUT /v1/templates` - Publish a template
/// - `DELETE /v1/cache/:key` - Invalidate a cached page
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let v1 = Router::new()
        .route("/page/:name", get(page_handler))
        .route("/templates", put(publish_handler))
        .route("/cache/:key", delete(invalidate_handler));

    Router::new()
        .nest("/v1", v1)
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
