//! Response DTOs for the page service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for publishing a template (PUT /v1/templates)
#[derive(Debug, Clone, Serialize)]
pub struct PublishResponse {
    /// Success message
    pub message: String,
    /// The template that was stored
    pub name: String,
}

impl PublishResponse {
    /// Creates a new PublishResponse
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            message: format!("Template '{}' published", name),
            name,
        }
    }
}

/// Response body for cache invalidation (DELETE /v1/cache/:key)
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Success message
    pub message: String,
    /// The key that was removed
    pub key: String,
}

impl InvalidateResponse {
    /// Creates a new InvalidateResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' invalidated", key),
            key,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of values stored
    pub sets: u64,
    /// Number of expired entries swept
    pub expired_removed: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            sets: stats.sets,
            expired_removed: stats.expired_removed,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
