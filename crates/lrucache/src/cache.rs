//! SharedCache: LRU cache behind a single exclusive lock
//!
//! `get` reorders the recency list, so reads mutate too. Every operation
//! therefore takes the same `Mutex` for its whole duration rather than
//! splitting into read and write locks.

use std::hash::Hash;

use parking_lot::Mutex;
use tracing::debug;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::lru::{Insert, LruCache};
use crate::stats::CacheStats;

/// Thread-safe LRU cache
///
/// Share it across threads with `Arc<SharedCache<K, V>>`.
pub struct SharedCache<K, V> {
    /// Index and recency list, guarded together
    inner: Mutex<LruCache<K, V>>,

    /// Usage counters, updated outside the lock
    stats: CacheStats,

    /// Fixed at construction
    capacity: usize,
}

impl<K, V> SharedCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new shared cache with the given capacity
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, at least 1
    ///
    /// # Returns
    /// * `Result<SharedCache>` - Empty cache, or `Error::InvalidCapacity`
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: Mutex::new(LruCache::new(capacity)?),
            stats: CacheStats::new(),
            capacity,
        })
    }

    /// Create a shared cache from a validated config
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.capacity)
    }

    /// Insert or overwrite a value
    ///
    /// # Returns
    /// * `true` if the key already existed and was updated in place
    pub fn set(&self, key: K, value: V) -> bool {
        let outcome = self.inner.lock().insert(key, value);

        match outcome {
            Insert::Updated => {
                self.stats.record_update();
                true
            }
            Insert::Inserted => {
                self.stats.record_insert();
                false
            }
            Insert::Evicted(..) => {
                self.stats.record_insert();
                self.stats.record_eviction();
                false
            }
        }
    }

    /// Check if a key is cached, without touching recency order
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// Remove a key, returning its value
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    /// Drop every entry; capacity and statistics are kept
    pub fn clear(&self) {
        self.inner.lock().clear();
        debug!(capacity = self.capacity, "cache cleared");
    }

    /// Get current number of entries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Get a copy of a value, marking it most recently used
    pub fn get(&self, key: &K) -> Option<V> {
        let value = self.inner.lock().get(key).cloned();

        if value.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        value
    }
}
