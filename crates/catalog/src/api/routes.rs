//! Axum route definitions for the catalog API.

use crate::api::handlers::{self, CatalogApiState};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Create the catalog routes.
///
/// # Routes
///
/// - `GET /api/v1/tickers` - Paginated ticker listing (`start`, `size`,
///   optional `sector` filter)
/// - `GET /api/v1/sectors` - Deduplicated sector index
pub fn catalog_routes(state: Arc<CatalogApiState>) -> Router {
    Router::new()
        .route("/api/v1/tickers", get(handlers::list_tickers))
        .route("/api/v1/sectors", get(handlers::list_sectors))
        .with_state(state)
}
