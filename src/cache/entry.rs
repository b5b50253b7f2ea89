//! Cache Entry Module
//!
//! Defines a single cached value together with its expiry instant.

use std::time::{Duration, Instant};

/// Roughly a century; used when `now + ttl` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

// == Cache Entry ==
/// A stored value and the instant after which it is no longer visible.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant at which the entry stops being visible
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry that expires `ttl` after now.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: expiry_from_now(ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current instant is greater than or equal
    /// to `expires_at`, so it is only visible strictly before that instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against a caller-supplied instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

// == Utility Functions ==
/// Computes `now + ttl`, clamping to a far-future instant on overflow.
pub fn expiry_from_now(ttl: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(ttl)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("test_value".to_string(), Duration::from_secs(60));

        assert_eq!(entry.value, "test_value");
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("test_value", Duration::from_millis(50));

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(80));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry {
            value: "test",
            expires_at: now,
        };

        // Visible only strictly before expires_at
        assert!(entry.is_expired_at(now), "Entry should be expired at boundary");
        assert!(entry.is_expired_at(now + Duration::from_millis(1)));
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let entry = CacheEntry::new("forever", Duration::MAX);

        assert!(!entry.is_expired());
        assert!(entry.expires_at > Instant::now() + Duration::from_secs(60 * 60 * 24 * 365));
    }
}
