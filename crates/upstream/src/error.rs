//! Error types for upstream provider calls.

use thiserror::Error;

/// Result type alias for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Errors from the upstream market-data provider.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Transport-level failure (connect, timeout, body decode).
    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The configured provider settings are unusable.
    #[error("Invalid upstream configuration: {0}")]
    Config(String),
}
