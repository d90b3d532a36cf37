//! Catalog construction: concurrent fan-out over sources, ordered fan-in.

use crate::error::{CatalogError, CatalogResult};
use crate::reader::SourceReader;
use crate::types::Catalog;
use futures::future::try_join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Builds the merged catalog from the configured source files.
///
/// The builder is a pure producer: it always rebuilds when invoked and
/// never touches the cache. Short-circuiting on an existing cached catalog
/// is the query service's job.
pub struct CatalogBuilder {
    sources: Vec<PathBuf>,
    reader: Arc<dyn SourceReader>,
}

impl CatalogBuilder {
    pub fn new(sources: Vec<PathBuf>, reader: Arc<dyn SourceReader>) -> Self {
        Self { sources, reader }
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Read every source concurrently and merge the results.
    ///
    /// All-or-nothing: if any source fails, the whole build fails with
    /// [`CatalogError::Build`] wrapping the first failure, and partial
    /// successes are discarded. On success the per-source sequences are
    /// concatenated in source-list order (not completion order) and every
    /// record gets its identifier stamped as `id = symbol`.
    pub async fn build(&self) -> CatalogResult<Catalog> {
        info!(sources = self.sources.len(), "building instrument catalog");

        let reads = self.sources.iter().map(|path| {
            let reader = Arc::clone(&self.reader);
            async move { reader.read_source(path).await }
        });

        // try_join_all keeps results in source-list order regardless of
        // which read completes first, and fails on the first error.
        let per_source = try_join_all(reads).await.map_err(|e| {
            warn!(error = %e, "catalog build aborted");
            CatalogError::build(e)
        })?;

        let mut records: Vec<_> = per_source.into_iter().flatten().collect();
        for record in &mut records {
            record.id = record.symbol.clone();
        }

        info!(records = records.len(), "instrument catalog built");
        Ok(Catalog::new(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::SourceReader;
    use crate::types::InstrumentRecord;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::collections::HashMap;
    use std::path::Path;
    use std::time::Duration;

    fn record(symbol: &str, sector: &str, source: &str) -> InstrumentRecord {
        InstrumentRecord {
            id: String::new(),
            symbol: symbol.to_string(),
            name: String::new(),
            sector: sector.to_string(),
            industry: String::new(),
            source: source.to_string(),
            extra: BTreeMap::new(),
        }
    }

    /// Reader stub serving canned results with a per-path delay, so tests
    /// can invert completion order relative to source order.
    struct StubReader {
        responses: HashMap<PathBuf, (Duration, CatalogResult<Vec<InstrumentRecord>>)>,
    }

    impl StubReader {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
            }
        }

        fn with(
            mut self,
            path: &str,
            delay: Duration,
            result: CatalogResult<Vec<InstrumentRecord>>,
        ) -> Self {
            self.responses.insert(PathBuf::from(path), (delay, result));
            self
        }
    }

    #[async_trait]
    impl SourceReader for StubReader {
        async fn read_source(&self, path: &Path) -> CatalogResult<Vec<InstrumentRecord>> {
            let (delay, result) = self
                .responses
                .get(path)
                .unwrap_or_else(|| panic!("unexpected source {}", path.display()));
            tokio::time::sleep(*delay).await;
            result.clone()
        }
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[tokio::test]
    async fn merge_order_follows_source_list_not_completion() {
        // The first source is the slowest; output order must not change.
        let reader = StubReader::new()
            .with(
                "a.csv",
                Duration::from_millis(50),
                Ok(vec![record("AA", "Tech", "a")]),
            )
            .with(
                "b.csv",
                Duration::from_millis(5),
                Ok(vec![record("BB", "Tech", "b"), record("CC", "Energy", "b")]),
            )
            .with(
                "c.csv",
                Duration::from_millis(1),
                Ok(vec![record("DD", "Finance", "c")]),
            );

        let builder = CatalogBuilder::new(paths(&["a.csv", "b.csv", "c.csv"]), Arc::new(reader));
        let catalog = builder.build().await.unwrap();

        let symbols: Vec<&str> = catalog.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["AA", "BB", "CC", "DD"]);
    }

    #[tokio::test]
    async fn build_stamps_id_from_symbol() {
        let reader = StubReader::new().with(
            "a.csv",
            Duration::ZERO,
            Ok(vec![record("AA", "Tech", "a"), record("BB", "Tech", "a")]),
        );

        let builder = CatalogBuilder::new(paths(&["a.csv"]), Arc::new(reader));
        let catalog = builder.build().await.unwrap();

        for rec in catalog.iter() {
            assert_eq!(rec.id, rec.symbol);
        }
    }

    #[tokio::test]
    async fn any_source_failure_fails_the_whole_build() {
        let reader = StubReader::new()
            .with(
                "a.csv",
                Duration::ZERO,
                Ok(vec![record("AA", "Tech", "a")]),
            )
            .with(
                "b.csv",
                Duration::from_millis(2),
                Err(CatalogError::Parse {
                    path: "b.csv".to_string(),
                    reason: "bad row".to_string(),
                }),
            )
            .with(
                "c.csv",
                Duration::from_millis(20),
                Ok(vec![record("CC", "Energy", "c")]),
            );

        let builder = CatalogBuilder::new(paths(&["a.csv", "b.csv", "c.csv"]), Arc::new(reader));
        let err = builder.build().await.unwrap_err();

        match err {
            CatalogError::Build(inner) => {
                assert!(matches!(*inner, CatalogError::Parse { .. }));
            }
            other => panic!("expected Build error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn building_twice_is_deterministic() {
        let make_reader = || {
            StubReader::new()
                .with(
                    "a.csv",
                    Duration::from_millis(3),
                    Ok(vec![record("AA", "Tech", "a")]),
                )
                .with(
                    "b.csv",
                    Duration::from_millis(1),
                    Ok(vec![record("BB", "Finance", "b")]),
                )
        };

        let first = CatalogBuilder::new(paths(&["a.csv", "b.csv"]), Arc::new(make_reader()))
            .build()
            .await
            .unwrap();
        let second = CatalogBuilder::new(paths(&["a.csv", "b.csv"]), Arc::new(make_reader()))
            .build()
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn empty_source_list_builds_empty_catalog() {
        let builder = CatalogBuilder::new(Vec::new(), Arc::new(StubReader::new()));
        let catalog = builder.build().await.unwrap();
        assert!(catalog.is_empty());
    }
}
