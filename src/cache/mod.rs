// ABOUTME: Caller-owned TTL cache with an injectable clock
// ABOUTME: Purge-on-access, no background task, no module-level singleton
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Skywatch Labs

//! TTL cache.
//!
//! A small, explicit cache for callers that poll upstream weather or Kp
//! sources on a schedule. It is owned by the caller and passed around like any
//! other value; there is no global state. Expired entries are dropped on
//! access rather than by a background task.
//!
//! Every operation has an `*_at` variant taking an explicit [`Instant`] so
//! TTL behavior is deterministic in tests; the plain variants use
//! `Instant::now()`.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Cached value with its expiry.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Caller-owned TTL cache over hashable keys.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    ttl: Duration,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    /// Create a cache whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Store a value, replacing any existing entry for the key.
    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    /// [`Self::insert`] with an explicit clock.
    pub fn insert_at(&mut self, key: K, value: V, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Fetch a live value. An expired entry is removed and reads as a miss.
    pub fn get(&mut self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// [`Self::get`] with an explicit clock.
    pub fn get_at(&mut self, key: &K, now: Instant) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired_at(now) => {
                self.entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired_at(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    /// Number of entries, including any not yet purged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn hit_before_ttl_miss_after() {
        let mut cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(60));
        let start = Instant::now();
        cache.insert_at("kp", 5, start);

        let just_before = start + Duration::from_secs(59);
        assert_eq!(cache.get_at(&"kp", just_before), Some(5));

        let at_expiry = start + Duration::from_secs(60);
        assert_eq!(cache.get_at(&"kp", at_expiry), None);
        // The expired entry was evicted on access.
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_refreshes_expiry() {
        let mut cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(60));
        let start = Instant::now();
        cache.insert_at("kp", 5, start);
        cache.insert_at("kp", 6, start + Duration::from_secs(50));

        let after_first_expiry = start + Duration::from_secs(90);
        assert_eq!(cache.get_at(&"kp", after_first_expiry), Some(6));
    }

    #[test]
    fn purge_removes_only_expired_entries() {
        let mut cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(60));
        let start = Instant::now();
        cache.insert_at("old", 1, start);
        cache.insert_at("fresh", 2, start + Duration::from_secs(45));

        let removed = cache.purge_expired_at(start + Duration::from_secs(70));
        assert_eq!(removed, 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get_at(&"fresh", start + Duration::from_secs(70)),
            Some(2)
        );
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(60));
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.clear();
        assert!(cache.is_empty());
    }
}
