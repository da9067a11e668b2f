//! Bounded, thread-safe metadata cache.
//!
//! Extraction results are kept in an in-memory least-recently-used store so
//! repeated renders of the same model skip recomputation. The whole
//! read-check-insert sequence runs under one lock, so concurrent callers for
//! the same key never compute the tree twice.
//!
//! # Characteristics
//!
//! - **Capacity**: fixed at construction; the least-recently-used entry is
//!   evicted on overflow.
//! - **Keying**: model identity (`name`, `version`).
//! - **Lifetime**: process-wide, dropped on [`MetadataCache::clear`] or
//!   process exit. Nothing is persisted.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::domain::error::Result;
use crate::schema::metadata::SchemaMetadata;

/// Cache key: the model identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelKey {
    /// Model name.
    pub name: String,
    /// Model version.
    pub version: u64,
}

/// Recency-ordered entry store. The back of `order` is most recent.
struct CacheState {
    entries: HashMap<ModelKey, Arc<SchemaMetadata>>,
    order: VecDeque<ModelKey>,
}

/// Bounded LRU store for extracted schema metadata.
pub struct MetadataCache {
    inner: Mutex<CacheState>,
    capacity: usize,
}

impl MetadataCache {
    /// Creates an empty cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheState {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity: capacity.max(1),
        }
    }

    /// Returns the cached metadata for `key`, computing and inserting it via
    /// `build` on a miss.
    ///
    /// The lock is held across the build closure: two racing callers for the
    /// same key serialize, and the loser observes the winner's entry instead
    /// of recomputing.
    ///
    /// # Errors
    ///
    /// Propagates the build closure's error; nothing is inserted on failure.
    pub fn get_or_insert_with<F>(&self, key: &ModelKey, build: F) -> Result<Arc<SchemaMetadata>>
    where
        F: FnOnce() -> Result<Arc<SchemaMetadata>>,
    {
        let mut state = self.inner.lock().expect("metadata cache lock poisoned");

        if let Some(found) = state.entries.get(key).cloned() {
            tracing::debug!(model = %key.name, version = key.version, "schema metadata cache hit");
            Self::touch(&mut state.order, key);
            return Ok(found);
        }

        let built = build()?;
        tracing::debug!(model = %key.name, version = key.version, "schema metadata cached");
        state.entries.insert(key.clone(), Arc::clone(&built));
        state.order.push_back(key.clone());

        while state.entries.len() > self.capacity {
            if let Some(evicted) = state.order.pop_front() {
                state.entries.remove(&evicted);
                tracing::debug!(model = %evicted.name, "schema metadata evicted (capacity)");
            }
        }

        Ok(built)
    }

    /// Drops every cached entry (hot-reload/testing hook).
    pub fn clear(&self) {
        let mut state = self.inner.lock().expect("metadata cache lock poisoned");
        state.entries.clear();
        state.order.clear();
    }

    /// Number of currently cached entries.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .expect("metadata cache lock poisoned")
            .entries
            .len()
    }

    /// True when no entries are cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Moves `key` to the most-recent position.
    fn touch(order: &mut VecDeque<ModelKey>, key: &ModelKey) {
        if let Some(pos) = order.iter().position(|k| k == key) {
            order.remove(pos);
        }
        order.push_back(key.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> ModelKey {
        ModelKey {
            name: name.to_string(),
            version: 0,
        }
    }

    fn meta(name: &str) -> Arc<SchemaMetadata> {
        Arc::new(SchemaMetadata {
            model_name: name.to_string(),
            version: 0,
            fields: Vec::new(),
        })
    }

    #[test]
    fn hit_returns_same_allocation() {
        let cache = MetadataCache::new(4);
        let first = cache
            .get_or_insert_with(&key("m"), || Ok(meta("m")))
            .unwrap();
        let second = cache
            .get_or_insert_with(&key("m"), || panic!("must not recompute on hit"))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn least_recently_used_entry_is_evicted() {
        let cache = MetadataCache::new(2);
        cache.get_or_insert_with(&key("a"), || Ok(meta("a"))).unwrap();
        cache.get_or_insert_with(&key("b"), || Ok(meta("b"))).unwrap();
        // Touch "a" so "b" becomes the eviction candidate.
        cache.get_or_insert_with(&key("a"), || unreachable!()).unwrap();
        cache.get_or_insert_with(&key("c"), || Ok(meta("c"))).unwrap();

        assert_eq!(cache.len(), 2);
        let mut recomputed = false;
        cache
            .get_or_insert_with(&key("b"), || {
                recomputed = true;
                Ok(meta("b"))
            })
            .unwrap();
        assert!(recomputed, "evicted entry should be rebuilt");
    }

    #[test]
    fn failed_build_inserts_nothing() {
        let cache = MetadataCache::new(2);
        let result = cache.get_or_insert_with(&key("bad"), || {
            Err(crate::FormweaverError::Schema("boom".to_string()))
        });
        assert!(result.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_empties_the_store() {
        let cache = MetadataCache::new(2);
        cache.get_or_insert_with(&key("a"), || Ok(meta("a"))).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
