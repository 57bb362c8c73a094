//! LRU (Least Recently Used) cache implementation
//!
//! Pairs an AHash index with a [`RecencyList`] so lookups, promotions and
//! evictions are all O(1).

use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::error::{Error, Result};
use crate::list::{NodeRef, RecencyList};

/// Entry stored in the recency list
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Outcome of [`LruCache::insert`]
#[derive(Debug, PartialEq, Eq)]
pub enum Insert<K, V> {
    /// Key was present, value replaced in place
    Updated,
    /// Key was new and fit without eviction
    Inserted,
    /// Key was new and the least recently used entry was evicted for it
    Evicted(K, V),
}

impl<K, V> Insert<K, V> {
    /// Whether the key already existed
    pub fn existed(&self) -> bool {
        matches!(self, Insert::Updated)
    }
}

/// LRU cache with fixed capacity
///
/// The index and the recency list always hold the same set of keys.
pub struct LruCache<K, V> {
    map: HashMap<K, NodeRef, RandomState>,
    list: RecencyList<Entry<K, V>>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` - `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }
        debug!(capacity, "creating LRU cache");

        Ok(Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            list: RecencyList::with_capacity(capacity),
            capacity,
        })
    }

    /// Create a cache from a validated config
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.capacity)
    }

    /// Get a value from the cache, marking it most recently used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let node = *self.map.get(key)?;
        self.list.move_to_front(Some(node));
        self.list.get(node).map(|entry| &entry.value)
    }

    /// Get a value without touching recency order
    pub fn peek(&self, key: &K) -> Option<&V> {
        let node = *self.map.get(key)?;
        self.list.get(node).map(|entry| &entry.value)
    }

    /// Check if a key is cached, without touching recency order
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Insert a key-value pair, returning `true` if the key already existed
    pub fn set(&mut self, key: K, value: V) -> bool {
        self.insert(key, value).existed()
    }

    /// Insert a key-value pair and report what happened to the cache
    ///
    /// At most one entry is evicted, and only when `key` is new and the
    /// cache is full.
    pub fn insert(&mut self, key: K, value: V) -> Insert<K, V> {
        if let Some(&node) = self.map.get(&key) {
            if let Some(entry) = self.list.get_mut(node) {
                entry.value = value;
            }
            self.list.move_to_front(Some(node));
            return Insert::Updated;
        }

        let evicted = if self.list.len() >= self.capacity {
            self.evict()
        } else {
            None
        };

        let node = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.map.insert(key, node);

        match evicted {
            Some((key, value)) => Insert::Evicted(key, value),
            None => Insert::Inserted,
        }
    }

    /// Remove a key from the cache
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let node = self.map.remove(key)?;
        self.list.remove(Some(node)).map(|entry| entry.value)
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Least recently used key, the next eviction candidate
    pub fn lru_key(&self) -> Option<&K> {
        self.list
            .back()
            .and_then(|node| self.list.get(node))
            .map(|entry| &entry.key)
    }

    /// Keys ordered most to least recently used
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.list.iter().map(|entry| &entry.key)
    }

    /// Clear the cache, keeping its capacity
    pub fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_back()?;
        self.map.remove(&entry.key);
        trace!("evicted least recently used entry");
        Some((entry.key, entry.value))
    }
}
