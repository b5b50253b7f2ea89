//! Page Cache - rendered HTML pages served through an expiring in-memory cache
//!
//! The core is [`cache::Cache`], a concurrent key-value store with per-entry
//! TTL and lazy expiration. The page service and HTTP API sit on top of it.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod templates;

pub use api::AppState;
pub use cache::Cache;
pub use config::Config;
pub use error::AppError;
pub use tasks::spawn_cleanup_task;
