//! Cache Module
//!
//! Provides an in-memory key-value cache with per-entry TTL and lazy expiration.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::Cache;
