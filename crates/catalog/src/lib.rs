//! # Catalog Crate
//!
//! The instrument catalog layer for Tickergate. It turns per-exchange
//! instrument list files into one merged, ordered, in-memory catalog,
//! derives the sector index from it, and serves paginated/filtered views
//! with lazy, single-flight cache population.
//!
//! ## Key Components
//!
//! - **Domain Types**: `InstrumentRecord`, `Catalog`, `Sector`,
//!   `SectorIndex`, `Page`
//! - **Traits**: `SourceReader` for per-source ingestion, `CacheStore` for
//!   the shared cache handle
//! - **Builder**: concurrent fan-out over all sources with an ordered,
//!   all-or-nothing fan-in
//! - **Service**: cache-or-build query access (`list_tickers`,
//!   `list_sectors`)
//! - **API**: axum handlers for the two read endpoints
//!
//! The core business logic never reaches for ambient global state: the
//! cache handle and the source reader are injected, so tests substitute
//! doubles freely.

pub mod api;
pub mod builder;
pub mod cache;
pub mod error;
pub mod reader;
pub mod sectors;
pub mod service;
pub mod types;

// Re-export main types for convenience
pub use builder::CatalogBuilder;
pub use cache::{CacheEntry, CacheStore, MemoryCache, CATALOG_KEY, SECTOR_INDEX_KEY};
pub use error::{CatalogError, CatalogResult};
pub use reader::{CsvSourceReader, SourceReader, DEFAULT_READ_TIMEOUT};
pub use sectors::build_sector_index;
pub use service::CatalogService;
pub use types::{
    Catalog, InstrumentRecord, Page, Sector, SectorIndex, DEFAULT_PAGE_SIZE, UNKNOWN_SECTOR,
};
