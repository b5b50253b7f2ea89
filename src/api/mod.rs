//! API Module
//!
//! HTTP handlers and routing for the page service.
//!
//! # Endpoints
//! - `GET /v1/page/:name` - Rendered page (cached)
//! - `PUT /v1/templates` - Publish a template
//! - `DELETE /v1/cache/:key` - Invalidate a cached page
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
