//! HTTP request handlers for the catalog API.

use crate::api::models::{
    ErrorResponse, ListSectorsResponse, ListTickersParams, ListTickersResponse,
};
use crate::service::CatalogService;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use tracing::{debug, error};

/// Shared state for catalog API handlers.
pub struct CatalogApiState {
    pub service: CatalogService,
}

impl CatalogApiState {
    pub fn new(service: CatalogService) -> Self {
        Self { service }
    }
}

/// GET /api/v1/tickers
pub async fn list_tickers(
    State(state): State<Arc<CatalogApiState>>,
    Query(params): Query<ListTickersParams>,
) -> Result<Json<ListTickersResponse>, (StatusCode, Json<ErrorResponse>)> {
    let page = params.page();
    debug!(
        start = page.start,
        size = page.size,
        sector = ?params.sector,
        "listing tickers"
    );

    let tickers = state
        .service
        .list_tickers(page, params.sector.as_deref())
        .await
        .map_err(|e| {
            error!(error = %e, "failed to list tickers");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(format!("Failed to list tickers: {e}"))),
            )
        })?;

    Ok(Json(ListTickersResponse { tickers }))
}

/// GET /api/v1/sectors
pub async fn list_sectors(
    State(state): State<Arc<CatalogApiState>>,
) -> Result<Json<ListSectorsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let index = state.service.list_sectors().await.map_err(|e| {
        error!(error = %e, "failed to list sectors");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(format!("Failed to list sectors: {e}"))),
        )
    })?;

    Ok(Json(ListSectorsResponse {
        sectors: index.sectors().to_vec(),
    }))
}
