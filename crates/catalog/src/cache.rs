//! Process-wide cache for the catalog and its derived indexes.
//!
//! The cache is the only shared mutable resource in the system. Values are
//! `Arc`-shared immutable snapshots, so a reader racing a writer observes
//! either the old or the new snapshot, never a partial one. There is no
//! expiry: a present entry is authoritative until process restart.

use crate::types::{Catalog, SectorIndex};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Cache key for the merged catalog.
pub const CATALOG_KEY: &str = "catalog";
/// Cache key for the derived sector index.
pub const SECTOR_INDEX_KEY: &str = "sector-index";

/// A cached derived structure.
#[derive(Debug, Clone)]
pub enum CacheEntry {
    Catalog(Arc<Catalog>),
    Sectors(Arc<SectorIndex>),
}

impl CacheEntry {
    pub fn as_catalog(&self) -> Option<Arc<Catalog>> {
        match self {
            CacheEntry::Catalog(c) => Some(Arc::clone(c)),
            _ => None,
        }
    }

    pub fn as_sectors(&self) -> Option<Arc<SectorIndex>> {
        match self {
            CacheEntry::Sectors(s) => Some(Arc::clone(s)),
            _ => None,
        }
    }
}

/// Trait for the key→value cache store.
///
/// Handed to the query service as an injectable `Arc<dyn CacheStore>` rather
/// than reached for as ambient global state, so tests get per-test
/// isolation and doubles.
pub trait CacheStore: Send + Sync {
    /// Look up a cached entry, or `None` when absent.
    fn get(&self, key: &str) -> Option<CacheEntry>;

    /// Insert or replace an entry. Concurrent puts of the same key are
    /// last-write-wins.
    fn put(&self, key: &str, value: CacheEntry);
}

/// In-memory implementation of [`CacheStore`].
///
/// A single process-wide mapping with no namespacing beyond the key string,
/// no size bound, and no eviction.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.read().get(key).cloned()
    }

    fn put(&self, key: &str, value: CacheEntry) {
        self.entries.write().insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Sector, SectorIndex};

    #[test]
    fn absent_key_is_none() {
        let cache = MemoryCache::new();
        assert!(cache.get(CATALOG_KEY).is_none());
    }

    #[test]
    fn put_then_get_returns_snapshot() {
        let cache = MemoryCache::new();
        let catalog = Arc::new(Catalog::default());

        cache.put(CATALOG_KEY, CacheEntry::Catalog(Arc::clone(&catalog)));

        let entry = cache.get(CATALOG_KEY).unwrap();
        let cached = entry.as_catalog().unwrap();
        assert!(Arc::ptr_eq(&cached, &catalog));
    }

    #[test]
    fn concurrent_put_is_last_write_wins() {
        let cache = MemoryCache::new();

        let first = Arc::new(SectorIndex::new(vec![Sector {
            id: 0,
            name: "Tech".to_string(),
        }]));
        let second = Arc::new(SectorIndex::new(vec![Sector {
            id: 0,
            name: "Energy".to_string(),
        }]));

        cache.put(SECTOR_INDEX_KEY, CacheEntry::Sectors(first));
        cache.put(SECTOR_INDEX_KEY, CacheEntry::Sectors(Arc::clone(&second)));

        let entry = cache.get(SECTOR_INDEX_KEY).unwrap();
        assert!(Arc::ptr_eq(&entry.as_sectors().unwrap(), &second));
    }

    #[test]
    fn entry_kind_mismatch_is_none() {
        let cache = MemoryCache::new();
        cache.put(CATALOG_KEY, CacheEntry::Catalog(Arc::new(Catalog::default())));

        let entry = cache.get(CATALOG_KEY).unwrap();
        assert!(entry.as_sectors().is_none());
    }

    #[test]
    fn clear_empties_the_store() {
        let cache = MemoryCache::new();
        cache.put(CATALOG_KEY, CacheEntry::Catalog(Arc::new(Catalog::default())));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
