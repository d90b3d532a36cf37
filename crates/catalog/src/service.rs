//! Catalog query service: lazy cache population and paginated reads.

use crate::builder::CatalogBuilder;
use crate::cache::{CacheEntry, CacheStore, CATALOG_KEY, SECTOR_INDEX_KEY};
use crate::error::CatalogResult;
use crate::sectors::build_sector_index;
use crate::types::{slice_page, Catalog, InstrumentRecord, Page, SectorIndex};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Read access over the catalog, lazily triggering a build on cache miss
/// and serving from the cache thereafter.
///
/// The cache store is injected at construction. Builds are single-flight:
/// concurrent cache-miss callers serialize on one async mutex and re-check
/// the cache before building, so at most one build runs per process at a
/// time and every waiter shares its result.
pub struct CatalogService {
    builder: CatalogBuilder,
    cache: Arc<dyn CacheStore>,
    build_lock: Mutex<()>,
}

impl CatalogService {
    pub fn new(builder: CatalogBuilder, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            builder,
            cache,
            build_lock: Mutex::new(()),
        }
    }

    /// The cached catalog, building and caching it first when absent.
    ///
    /// A failed build caches nothing, so the next call retries from the
    /// source files.
    pub async fn catalog(&self) -> CatalogResult<Arc<Catalog>> {
        if let Some(catalog) = self.cache.get(CATALOG_KEY).and_then(|e| e.as_catalog()) {
            return Ok(catalog);
        }

        let _guard = self.build_lock.lock().await;
        // A concurrent caller may have finished the build while this one
        // waited on the lock.
        if let Some(catalog) = self.cache.get(CATALOG_KEY).and_then(|e| e.as_catalog()) {
            debug!("catalog built by concurrent caller, serving from cache");
            return Ok(catalog);
        }

        let catalog = Arc::new(self.builder.build().await?);
        self.cache
            .put(CATALOG_KEY, CacheEntry::Catalog(Arc::clone(&catalog)));
        Ok(catalog)
    }

    /// Paginated ticker listing, optionally filtered to one sector label.
    ///
    /// The filter applies before pagination. Out-of-range pages yield an
    /// empty list, never an error; a build failure is surfaced as-is so it
    /// stays distinguishable from a legitimately empty catalog.
    pub async fn list_tickers(
        &self,
        page: Page,
        sector: Option<&str>,
    ) -> CatalogResult<Vec<InstrumentRecord>> {
        let catalog = self.catalog().await?;

        let records = match sector {
            Some(label) => {
                let filtered: Vec<&InstrumentRecord> =
                    catalog.iter().filter(|r| r.sector == label).collect();
                slice_page(&filtered, page)
                    .iter()
                    .map(|r| (*r).clone())
                    .collect()
            }
            None => catalog.page(page).to_vec(),
        };

        Ok(records)
    }

    /// The sector index, derived and cached on first access.
    ///
    /// Served directly on cache hit; on miss the catalog is obtained (from
    /// cache or a fresh build) and the index derived from it, so both paths
    /// converge on the same output.
    pub async fn list_sectors(&self) -> CatalogResult<Arc<SectorIndex>> {
        if let Some(index) = self.cache.get(SECTOR_INDEX_KEY).and_then(|e| e.as_sectors()) {
            return Ok(index);
        }

        let catalog = self.catalog().await?;

        let _guard = self.build_lock.lock().await;
        if let Some(index) = self.cache.get(SECTOR_INDEX_KEY).and_then(|e| e.as_sectors()) {
            return Ok(index);
        }

        let index = Arc::new(build_sector_index(&catalog));
        self.cache
            .put(SECTOR_INDEX_KEY, CacheEntry::Sectors(Arc::clone(&index)));
        Ok(index)
    }
}
