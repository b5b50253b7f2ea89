//! Cache Store Module
//!
//! The expiring key-value cache: a `HashMap` behind a single `RwLock`, with
//! lazy expiration on lookup and an explicit sweep for reclaiming memory.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::stats::StatsCounters;
use crate::cache::{CacheEntry, CacheStats};

// == Cache ==
/// Concurrent in-memory cache whose entries expire after a per-entry TTL.
///
/// All operations are synchronous and only hold the lock for the map access.
/// Lookups share a read lock; writes are exclusive. Values are cloned out,
/// callers never get references into the map.
#[derive(Debug)]
pub struct Cache<V> {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    /// Performance statistics
    stats: StatsCounters,
}

impl<V> Cache<V> {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stats: StatsCounters::default(),
        }
    }

    // An entry is always written whole, so a panic elsewhere while holding
    // the lock cannot leave a torn value behind.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl`, replacing any previous entry.
    ///
    /// A zero `ttl` would produce an entry that is already expired, so the
    /// call is a no-op and any existing entry for `key` is left untouched.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        if ttl.is_zero() {
            debug!(key = %key, "Ignoring cache set with zero TTL");
            return;
        }

        let entry = CacheEntry::new(value, ttl);
        self.write().insert(key, entry);
        self.stats.record_set();
    }

    // == Remove ==
    /// Removes the entry for `key`.
    ///
    /// Returns the value only if the entry was still live.
    pub fn remove(&self, key: &str) -> Option<V> {
        let entry = self.write().remove(key)?;
        if entry.is_expired() {
            None
        } else {
            Some(entry.value)
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let removed = {
            let mut entries = self.write();
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired_at(now));
            before - entries.len()
        };

        self.stats.record_expired_removed(removed);
        removed
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    // == Is Empty ==
    /// Returns true if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len())
    }
}

impl<V: Clone> Cache<V> {
    // == Get ==
    /// Returns a clone of the live value for `key`.
    ///
    /// Expired entries read as absent but stay in the map until they are
    /// overwritten, removed, or swept by [`cleanup_expired`](Self::cleanup_expired).
    pub fn get(&self, key: &str) -> Option<V> {
        let value = {
            let entries = self.read();
            entries
                .get(key)
                .filter(|entry| !entry.is_expired())
                .map(|entry| entry.value.clone())
        };

        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }
}

impl<V> Default for Cache<V> {
    fn default() -> Self {
        Self::new()
    }
}
