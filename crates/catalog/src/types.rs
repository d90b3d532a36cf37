//! Domain types for the instrument catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sector label used by source files for instruments with no known sector.
pub const UNKNOWN_SECTOR: &str = "n/a";

/// Default pagination window applied when a request carries no usable values.
pub const DEFAULT_PAGE_START: usize = 0;
/// Default page size applied when a request carries no usable value.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// One instrument row from a source file plus derived fields.
///
/// `id` equals `symbol` and is stamped by the catalog builder after the
/// merge. Symbols are unique within a source only; the merge intentionally
/// keeps duplicate symbols listed on more than one exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentRecord {
    /// Stable identifier, equal to `symbol`.
    #[serde(default)]
    pub id: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Company name ("" when the source has no name column).
    #[serde(default)]
    pub name: String,
    /// Sector label; [`UNKNOWN_SECTOR`] denotes "unknown".
    pub sector: String,
    /// Industry label ("" when the source has no industry column).
    #[serde(default)]
    pub industry: String,
    /// Exchange tag derived from the source file path.
    pub source: String,
    /// Remaining source columns, passed through opaquely.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// The full merged, ordered collection of instrument records.
///
/// Order is source-list order, then file order within each source, and is
/// deterministic across repeated builds of the same inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    records: Vec<InstrumentRecord>,
}

impl Catalog {
    pub fn new(records: Vec<InstrumentRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[InstrumentRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InstrumentRecord> {
        self.records.iter()
    }

    /// The sub-range `[start, start+size)` clamped to the catalog length.
    ///
    /// An out-of-range start yields an empty slice, never an error.
    pub fn page(&self, page: Page) -> &[InstrumentRecord] {
        slice_page(&self.records, page)
    }
}

/// Clamped pagination over any record slice.
pub(crate) fn slice_page<T>(items: &[T], page: Page) -> &[T] {
    let start = page.start.min(items.len());
    let end = page.start.saturating_add(page.size).min(items.len());
    &items[start..end]
}

/// Sanitized pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub start: usize,
    pub size: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            start: DEFAULT_PAGE_START,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Page {
    pub fn new(start: usize, size: usize) -> Self {
        Self { start, size }
    }

    /// Build a page from raw request values.
    ///
    /// Each parameter independently falls back to its default when absent
    /// or invalid: a negative start becomes 0, a non-positive size becomes
    /// 25.
    pub fn from_raw(start: Option<i64>, size: Option<i64>) -> Self {
        let start = match start {
            Some(s) if s >= 0 => s as usize,
            _ => DEFAULT_PAGE_START,
        };
        let size = match size {
            Some(s) if s > 0 => s as usize,
            _ => DEFAULT_PAGE_SIZE,
        };
        Self { start, size }
    }
}

/// One sector label with its ordinal identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub id: usize,
    pub name: String,
}

/// Deduplicated, ordinal-identified list of sector labels.
///
/// Ordinals are assigned in first-seen order over one catalog build and are
/// stable only within that build; rebuilding from changed source files may
/// reorder them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectorIndex {
    sectors: Vec<Sector>,
}

impl SectorIndex {
    pub fn new(sectors: Vec<Sector>) -> Self {
        Self { sectors }
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sector> {
        self.sectors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(symbol: &str) -> InstrumentRecord {
        InstrumentRecord {
            id: symbol.to_string(),
            symbol: symbol.to_string(),
            name: String::new(),
            sector: "Tech".to_string(),
            industry: String::new(),
            source: "nasdaq".to_string(),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn page_from_raw_applies_defaults() {
        assert_eq!(Page::from_raw(None, None), Page::new(0, 25));
        assert_eq!(Page::from_raw(Some(-1), Some(10)), Page::new(0, 10));
        assert_eq!(Page::from_raw(Some(5), Some(0)), Page::new(5, 25));
        assert_eq!(Page::from_raw(Some(-3), Some(-7)), Page::new(0, 25));
        assert_eq!(Page::from_raw(Some(7), Some(3)), Page::new(7, 3));
    }

    #[test]
    fn catalog_page_clamps_to_length() {
        let catalog = Catalog::new(vec![record("AA"), record("BB"), record("CC")]);

        assert_eq!(catalog.page(Page::new(0, 2)).len(), 2);
        assert_eq!(catalog.page(Page::new(1, 10)).len(), 2);
        assert_eq!(catalog.page(Page::new(3, 5)).len(), 0);
        assert_eq!(catalog.page(Page::new(100, 5)).len(), 0);
        assert_eq!(catalog.page(Page::new(0, 10)).len(), 3);
    }

    #[test]
    fn catalog_page_out_of_range_is_empty_not_error() {
        let catalog = Catalog::new(vec![record("AA")]);
        let page = catalog.page(Page::new(usize::MAX, usize::MAX));
        assert!(page.is_empty());
    }

    #[test]
    fn instrument_record_flattens_extra_columns() {
        let mut extra = BTreeMap::new();
        extra.insert("MarketCap".to_string(), "$1B".to_string());

        let mut rec = record("AA");
        rec.extra = extra;

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["MarketCap"], "$1B");
        assert_eq!(json["symbol"], "AA");
    }
}
