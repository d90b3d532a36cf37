//! HTTP API for the instrument catalog.
//!
//! ## Modules
//!
//! - `handlers` - Axum handlers for the two read operations
//! - `models` - Request/response types
//! - `routes` - Axum router

pub mod handlers;
pub mod models;
pub mod routes;

pub use handlers::CatalogApiState;
pub use routes::catalog_routes;
