//! Sector index derivation.

use crate::types::{Catalog, Sector, SectorIndex, UNKNOWN_SECTOR};
use std::collections::HashSet;

/// Derive the sector index from a catalog.
///
/// Enumerates the distinct sector labels in first-seen order, excluding the
/// `"n/a"` sentinel, and assigns ordinal identifiers 0..N-1 in that order.
/// Pure function of its input; caching the result is the caller's decision.
pub fn build_sector_index(catalog: &Catalog) -> SectorIndex {
    let mut seen = HashSet::new();
    let mut sectors = Vec::new();

    for record in catalog.iter() {
        if record.sector == UNKNOWN_SECTOR {
            continue;
        }
        if seen.insert(record.sector.clone()) {
            sectors.push(Sector {
                id: sectors.len(),
                name: record.sector.clone(),
            });
        }
    }

    SectorIndex::new(sectors)
}
