//! Cache configuration

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Default number of entries when no capacity is configured
pub const DEFAULT_CAPACITY: usize = 1024;

/// Settings used to build an [`LruCache`](crate::LruCache) or
/// [`SharedCache`](crate::SharedCache)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries, fixed for the life of the cache
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Create a config with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Reject settings no cache can be built from
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            warn!(capacity = self.capacity, "rejecting cache config");
            return Err(Error::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}
