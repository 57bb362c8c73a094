//! # lrucache
//!
//! Fixed-capacity LRU cache with O(1) get, set and clear.
//!
//! ## Architecture
//! - **RecencyList**: arena-backed doubly-linked list, front = most recent
//! - **LruCache**: AHash index of keys to list nodes, evicts the back node
//! - **SharedCache**: `LruCache` behind one `parking_lot::Mutex`, with stats
//!
//! ```
//! use lrucache::SharedCache;
//!
//! let cache = SharedCache::new(2).unwrap();
//! cache.set("a", 1);
//! cache.set("b", 2);
//! cache.get(&"a");
//! cache.set("c", 3); // evicts "b"
//!
//! assert_eq!(cache.get(&"b"), None);
//! assert_eq!(cache.get(&"a"), Some(1));
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod list;
mod lru;
mod stats;

pub use cache::SharedCache;
pub use config::{CacheConfig, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use list::{Iter, NodeRef, RecencyList};
pub use lru::{Insert, LruCache};
pub use stats::CacheStats;
