//! Bounded memoization of route resolution.

use std::sync::{Mutex, MutexGuard, PoisonError};

use lru_cache::LruCache;
use tracing::debug;

use crate::table::{Resolved, RouteTable};

/// Default number of cached paths.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// An LRU cache of path → resolution results.
///
/// Wraps [`RouteTable::resolve`] so repeated requests for the same path skip
/// the table scan. Keys are exact path strings (query string excluded);
/// misses are cached too, since the table is immutable once serving starts
/// and a miss can only become a hit after a restart.
///
/// Interior mutability keeps lookups at `&self` so one cache can serve many
/// in-flight requests; the lock is held only around the probe and the
/// insert, never across a table scan. Two concurrent misses for the same
/// cold path may both scan the table, but resolution is deterministic and
/// the insertions agree.
pub struct ResolutionCache<H> {
    entries: Mutex<LruCache<String, Option<Resolved<H>>>>,
}

impl<H: Clone> Default for ResolutionCache<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Clone> ResolutionCache<H> {
    /// Creates a cache with the default capacity of 256 paths.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a cache bounded to `capacity` paths.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns the cached resolution for `path`, resolving and recording it
    /// on a miss. The least-recently-used entry is evicted at capacity.
    pub fn get_or_resolve(&self, path: &str, table: &RouteTable<H>) -> Option<Resolved<H>> {
        if let Some(cached) = self.lock().get_mut(path) {
            debug!(path, "resolution cache hit");
            return cached.clone();
        }

        debug!(path, "resolution cache miss");
        let resolved = table.resolve(path);
        self.lock().insert(path.to_string(), resolved.clone());
        resolved
    }

    /// Returns the number of cached paths.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true when the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns true when `path` is currently cached. Marks the entry as
    /// recently used.
    pub fn contains(&self, path: &str) -> bool {
        self.lock().contains_key(path)
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, Option<Resolved<H>>>> {
        // A panicked holder cannot leave the map in a broken state; keep
        // serving on poison instead of propagating the panic.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable<&'static str> {
        let mut table = RouteTable::new();
        table.register("/", "index").unwrap();
        table.register("/users/{id}", "user").unwrap();
        table
    }

    #[test]
    fn repeated_resolution_is_coherent() {
        let table = table();
        let cache = ResolutionCache::new();

        let first = cache.get_or_resolve("/users/9", &table).unwrap();
        let second = cache.get_or_resolve("/users/9", &table).unwrap();
        assert_eq!(first.handler, second.handler);
        assert_eq!(first.params, second.params);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn misses_are_cached() {
        let table = table();
        let cache = ResolutionCache::new();

        assert!(cache.get_or_resolve("/nope", &table).is_none());
        assert!(cache.contains("/nope"));
        assert!(cache.get_or_resolve("/nope", &table).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn least_recently_used_path_is_evicted() {
        let mut table = RouteTable::new();
        table.register("/p/{n}", "p").unwrap();
        let cache = ResolutionCache::with_capacity(256);

        for n in 0..256 {
            cache.get_or_resolve(&format!("/p/{n}"), &table);
        }
        assert_eq!(cache.len(), 256);
        assert!(cache.contains("/p/0"));

        // /p/0 was just touched, so the 257th distinct path evicts /p/1.
        cache.get_or_resolve("/p/256", &table);
        assert_eq!(cache.len(), 256);
        assert!(!cache.contains("/p/1"));
        assert!(cache.contains("/p/256"));
    }

    #[test]
    fn capacity_one_keeps_only_the_latest_path() {
        let table = table();
        let cache = ResolutionCache::with_capacity(1);

        cache.get_or_resolve("/", &table);
        cache.get_or_resolve("/users/1", &table);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("/users/1"));
        assert!(!cache.contains("/"));
    }
}
