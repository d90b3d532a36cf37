//! Source file readers.
//!
//! A source is one delimited-text file listing the instruments of a single
//! exchange. The first record is a header row; `Symbol` and `Sector`
//! columns are required, everything else is passed through opaquely. The
//! exchange tag is taken from the file name itself.

use crate::error::{CatalogError, CatalogResult};
use crate::types::InstrumentRecord;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Prefix conventionally carried by exchange list files
/// (`companylist-nasdaq.csv` and friends).
const SOURCE_FILE_PREFIX: &str = "companylist-";

const SYMBOL_COLUMN: &str = "symbol";
const SECTOR_COLUMN: &str = "sector";
const NAME_COLUMN: &str = "name";
const INDUSTRY_COLUMN: &str = "industry";

/// Default bound on a single source read.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for reading one source file into instrument records.
///
/// The catalog builder fans out over this trait, so tests can substitute
/// instrumented or failing readers for the CSV implementation.
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// Read every record of the source at `path`, tagged with its exchange.
    ///
    /// Fails atomically: a parse failure partway through the file discards
    /// all records accumulated for that source.
    async fn read_source(&self, path: &Path) -> CatalogResult<Vec<InstrumentRecord>>;
}

/// CSV implementation of [`SourceReader`].
///
/// Parsing runs on the blocking pool so concurrent source reads do not
/// stall the runtime, and each read is bounded by a timeout.
#[derive(Debug, Clone)]
pub struct CsvSourceReader {
    read_timeout: Duration,
}

impl CsvSourceReader {
    pub fn new(read_timeout: Duration) -> Self {
        Self { read_timeout }
    }
}

impl Default for CsvSourceReader {
    fn default() -> Self {
        Self::new(DEFAULT_READ_TIMEOUT)
    }
}

#[async_trait]
impl SourceReader for CsvSourceReader {
    async fn read_source(&self, path: &Path) -> CatalogResult<Vec<InstrumentRecord>> {
        let owned: PathBuf = path.to_path_buf();
        let parse = tokio::task::spawn_blocking(move || parse_source_file(&owned));

        match tokio::time::timeout(self.read_timeout, parse).await {
            Err(_) => Err(CatalogError::Timeout {
                path: display_path(path),
                seconds: self.read_timeout.as_secs(),
            }),
            Ok(Err(join_err)) => Err(CatalogError::Parse {
                path: display_path(path),
                reason: format!("reader task failed: {join_err}"),
            }),
            Ok(Ok(result)) => result,
        }
    }
}

/// Extract the exchange tag from a source file path.
///
/// The file stem with the `companylist-` prefix stripped when present, so
/// `tickers/companylist-nasdaq.csv` yields `nasdaq` and a bare
/// `nyse.csv` yields `nyse`.
pub fn exchange_tag(path: &Path) -> CatalogResult<String> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CatalogError::Parse {
            path: display_path(path),
            reason: "source path has no usable file name".to_string(),
        })?;

    Ok(stem.strip_prefix(SOURCE_FILE_PREFIX).unwrap_or(stem).to_string())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn csv_error(path: &Path, err: csv::Error) -> CatalogError {
    if err.is_io_error() {
        CatalogError::Io {
            path: display_path(path),
            reason: err.to_string(),
        }
    } else {
        CatalogError::Parse {
            path: display_path(path),
            reason: err.to_string(),
        }
    }
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

/// Parse one source file, streaming records through the csv reader.
fn parse_source_file(path: &Path) -> CatalogResult<Vec<InstrumentRecord>> {
    let source = exchange_tag(path)?;

    let mut reader = csv::Reader::from_path(path).map_err(|e| csv_error(path, e))?;
    let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();

    let symbol_idx =
        find_column(&headers, SYMBOL_COLUMN).ok_or_else(|| CatalogError::MissingColumn {
            path: display_path(path),
            column: SYMBOL_COLUMN.to_string(),
        })?;
    let sector_idx =
        find_column(&headers, SECTOR_COLUMN).ok_or_else(|| CatalogError::MissingColumn {
            path: display_path(path),
            column: SECTOR_COLUMN.to_string(),
        })?;
    let name_idx = find_column(&headers, NAME_COLUMN);
    let industry_idx = find_column(&headers, INDUSTRY_COLUMN);

    let lifted = [Some(symbol_idx), Some(sector_idx), name_idx, industry_idx];

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| csv_error(path, e))?;

        let mut extra = BTreeMap::new();
        for (idx, value) in row.iter().enumerate() {
            if lifted.contains(&Some(idx)) {
                continue;
            }
            if let Some(header) = headers.get(idx) {
                extra.insert(header.to_string(), value.to_string());
            }
        }

        let field = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i)).unwrap_or_default().to_string()
        };

        records.push(InstrumentRecord {
            // Stamped by the catalog builder after the merge.
            id: String::new(),
            symbol: field(Some(symbol_idx)),
            name: field(name_idx),
            sector: field(Some(sector_idx)),
            industry: field(industry_idx),
            source: source.clone(),
            extra,
        });
    }

    debug!(path = %path.display(), count = records.len(), "parsed source file");
    Ok(records)
}
