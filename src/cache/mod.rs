//! Entry cache for kernel matrices
//!
//! Single-entry lookups on a `KernelMatrix` whose full matrix has not been
//! computed yet go through this cache. Kernel matrices are symmetric, so
//! K(i,j) and K(j,i) share one slot.

use lru::LruCache;
use std::num::NonZeroUsize;

/// Default number of cached entries per kernel matrix
pub const DEFAULT_CAPACITY: usize = 4096;

/// Cache key, normalized so that i <= j
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EntryKey {
    i: usize,
    j: usize,
}

impl EntryKey {
    fn new(i: usize, j: usize) -> Self {
        if i <= j {
            Self { i, j }
        } else {
            Self { i: j, j: i }
        }
    }
}

/// LRU cache of raw kernel values
pub struct KernelCache {
    cache: LruCache<EntryKey, f64>,
    hits: u64,
    misses: u64,
}

impl KernelCache {
    /// Create a cache holding at most `capacity` entries (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up K(i, j), computing and storing it on a miss
    pub fn get_or_compute<F: FnOnce() -> f64>(&mut self, i: usize, j: usize, compute: F) -> f64 {
        let key = EntryKey::new(i, j);
        if let Some(&value) = self.cache.get(&key) {
            self.hits += 1;
            return value;
        }
        self.misses += 1;
        let value = compute();
        self.cache.put(key, value);
        value
    }

    /// Cached value of K(i, j) without computing
    pub fn peek(&self, i: usize, j: usize) -> Option<f64> {
        self.cache.peek(&EntryKey::new(i, j)).copied()
    }

    /// Fraction of lookups served from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            capacity: self.cache.cap().get(),
            size: self.cache.len(),
        }
    }

    /// Drop all entries and reset counters
    pub fn clear(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

impl Default for KernelCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub capacity: usize,
    pub size: usize,
}
