//! Error types for the catalog crate.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while reading sources or building the catalog.
///
/// The `Parse`, `MissingColumn`, `Io` and `Timeout` variants are all
/// per-source read failures; `Build` is produced only by the catalog
/// builder and wraps the first per-source failure encountered.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    /// Malformed source file (bad row, wrong field count, invalid UTF-8).
    #[error("Malformed source file {path}: {reason}")]
    Parse { path: String, reason: String },

    /// A required column is absent from the header row.
    #[error("Source file {path} is missing required column '{column}'")]
    MissingColumn { path: String, column: String },

    /// The source file could not be read at all.
    #[error("Failed to read source file {path}: {reason}")]
    Io { path: String, reason: String },

    /// A per-source read exceeded its time bound.
    #[error("Reading source file {path} timed out after {seconds}s")]
    Timeout { path: String, seconds: u64 },

    /// The whole build failed; wraps the first source failure.
    #[error("Catalog build failed: {0}")]
    Build(#[source] Box<CatalogError>),
}

impl CatalogError {
    /// Wrap a per-source failure as a whole-build failure.
    pub fn build(source: CatalogError) -> Self {
        CatalogError::Build(Box::new(source))
    }

    /// Returns true if this is a per-source read failure (any kind).
    pub fn is_source_failure(&self) -> bool {
        !matches!(self, CatalogError::Build(_))
    }
}
