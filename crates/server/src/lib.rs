//! Server infrastructure for Tickergate
//!
//! An axum-based HTTP server with lifecycle management and graceful
//! shutdown: [`HttpServer`] binds, serves until its shutdown token is
//! cancelled, and then drains; `spawn()` and `run_with_ctrl_c()` cover the
//! common run modes.
//!
//! Shutdown coordination uses `CancellationToken` from `tokio_util`,
//! allowing hierarchical shutdown where cancelling a parent token cancels
//! all child tokens.
//!
//! # Modules
//!
//! - [`config`] - Bind configuration
//! - [`http`] - HTTP server using Axum
//! - [`health`] - Health check endpoint
//! - [`shutdown`] - Graceful shutdown utilities

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod shutdown;

// Re-exports for convenience
pub use config::{ServerConfig, DEFAULT_HTTP_PORT};
pub use error::{Result, ServerError};
pub use health::{health_handler, HealthState, HealthStatus};
pub use http::HttpServer;
pub use shutdown::ShutdownController;
