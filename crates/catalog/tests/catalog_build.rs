//! End-to-end catalog tests over real source files.

use async_trait::async_trait;
use catalog::{
    CatalogBuilder, CatalogError, CatalogResult, CatalogService, CsvSourceReader,
    InstrumentRecord, MemoryCache, Page, SourceReader,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

const NASDAQ: &str = "Symbol,Name,Sector,industry\n\
                      AA,Alpha Corp,Tech,Software\n\
                      BB,Beta Inc,Tech,Hardware\n";
const NYSE: &str = "Symbol,Name,Sector,industry\n\
                    CC,Gamma Ltd,Finance,Banks\n\
                    DD,Delta Co,n/a,\n\
                    EE,Epsilon SA,Energy,Oil\n";
const AMEX: &str = "Symbol,Name,Sector,industry\n\
                    FF,Zeta PLC,n/a,\n";

fn write_sources(dir: &TempDir) -> Vec<PathBuf> {
    let files = [
        ("companylist-nasdaq.csv", NASDAQ),
        ("companylist-nyse.csv", NYSE),
        ("companylist-amex.csv", AMEX),
    ];
    files
        .iter()
        .map(|(name, content)| {
            let path = dir.path().join(name);
            fs::write(&path, content).unwrap();
            path
        })
        .collect()
}

fn file_service(sources: Vec<PathBuf>) -> CatalogService {
    let builder = CatalogBuilder::new(sources, Arc::new(CsvSourceReader::default()));
    CatalogService::new(builder, Arc::new(MemoryCache::new()))
}

/// Counts delegated reads so cache-coherence can be asserted end to end.
struct CountingCsvReader {
    inner: CsvSourceReader,
    reads: AtomicUsize,
}

impl CountingCsvReader {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: CsvSourceReader::default(),
            reads: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SourceReader for CountingCsvReader {
    async fn read_source(&self, path: &Path) -> CatalogResult<Vec<InstrumentRecord>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_source(path).await
    }
}

#[tokio::test]
async fn merged_catalog_is_complete_and_ordered() {
    let dir = TempDir::new().unwrap();
    let sources = write_sources(&dir);
    let service = file_service(sources);

    let tickers = service.list_tickers(Page::new(0, 10), None).await.unwrap();

    let symbols: Vec<&str> = tickers.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, ["AA", "BB", "CC", "DD", "EE", "FF"]);

    let tags: Vec<&str> = tickers.iter().map(|r| r.source.as_str()).collect();
    assert_eq!(tags, ["nasdaq", "nasdaq", "nyse", "nyse", "nyse", "amex"]);

    for rec in &tickers {
        assert_eq!(rec.id, rec.symbol);
    }
}

#[tokio::test]
async fn sector_index_excludes_sentinel_and_keeps_first_seen_order() {
    let dir = TempDir::new().unwrap();
    let sources = write_sources(&dir);
    let service = file_service(sources);

    let index = service.list_sectors().await.unwrap();
    let actual: Vec<(usize, &str)> = index.iter().map(|s| (s.id, s.name.as_str())).collect();
    assert_eq!(actual, [(0, "Tech"), (1, "Finance"), (2, "Energy")]);
}

#[tokio::test]
async fn repeated_builds_from_same_files_are_identical() {
    let dir = TempDir::new().unwrap();
    let sources = write_sources(&dir);

    let reader: Arc<dyn SourceReader> = Arc::new(CsvSourceReader::default());
    let first = CatalogBuilder::new(sources.clone(), Arc::clone(&reader))
        .build()
        .await
        .unwrap();
    let second = CatalogBuilder::new(sources, reader).build().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn sources_are_read_once_across_both_endpoints() {
    let dir = TempDir::new().unwrap();
    let sources = write_sources(&dir);

    let reader = CountingCsvReader::new();
    let builder = CatalogBuilder::new(sources, Arc::clone(&reader) as Arc<dyn SourceReader>);
    let service = CatalogService::new(builder, Arc::new(MemoryCache::new()));

    service.list_tickers(Page::default(), None).await.unwrap();
    service.list_tickers(Page::new(2, 2), None).await.unwrap();
    service.list_sectors().await.unwrap();
    service.list_sectors().await.unwrap();

    assert_eq!(reader.reads.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn malformed_source_fails_whole_build_until_corrected() {
    let dir = TempDir::new().unwrap();
    let sources = write_sources(&dir);

    // Break the middle source: row with the wrong field count.
    let nyse_path = sources[1].clone();
    fs::write(&nyse_path, "Symbol,Sector\nCC,Finance\nDD,n/a,EXTRA\n").unwrap();

    let service = file_service(sources);

    let err = service.list_tickers(Page::default(), None).await.unwrap_err();
    assert!(matches!(err, CatalogError::Build(_)));

    // Nothing was cached: fixing the file and retrying yields the full merge.
    fs::write(&nyse_path, NYSE).unwrap();
    let tickers = service.list_tickers(Page::new(0, 10), None).await.unwrap();
    assert_eq!(tickers.len(), 6);
}

#[tokio::test]
async fn empty_sources_build_an_empty_catalog_not_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("companylist-nasdaq.csv");
    fs::write(&path, "Symbol,Sector\n").unwrap();

    let service = file_service(vec![path]);

    let tickers = service.list_tickers(Page::default(), None).await.unwrap();
    assert!(tickers.is_empty());

    let sectors = service.list_sectors().await.unwrap();
    assert!(sectors.is_empty());
}
