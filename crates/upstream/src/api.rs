//! Proxy handlers and routes for the upstream market-data provider.
//!
//! Every handler forwards to the provider and hands the response through
//! as opaque JSON; an unreachable or failing provider surfaces as 502.

use crate::client::ProviderClient;
use crate::error::UpstreamError;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

/// Shared state for the proxy handlers.
#[derive(Clone)]
pub struct ProxyState {
    pub provider: ProviderClient,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

fn bad_gateway(err: UpstreamError) -> (StatusCode, Json<ErrorResponse>) {
    error!(error = %err, "upstream provider call failed");
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            success: false,
            error: err.to_string(),
        }),
    )
}

type ProxyResult = Result<Json<Value>, (StatusCode, Json<ErrorResponse>)>;

#[derive(Debug, Default, Deserialize)]
pub struct IntradayParams {
    pub interval: Option<String>,
    #[serde(rename = "prePost")]
    pub pre_post: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoricalParams {
    pub interval: Option<String>,
    pub range: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub region: Option<String>,
    pub lang: Option<String>,
}

/// GET /api/v1/quote/realtime/{tickers}
pub async fn realtime_quotes(
    State(state): State<Arc<ProxyState>>,
    Path(tickers): Path<String>,
) -> ProxyResult {
    let data = state
        .provider
        .realtime_quotes(&tickers)
        .await
        .map_err(bad_gateway)?;
    Ok(Json(data))
}

/// GET /api/v1/chart/intraday/{ticker}
pub async fn intraday_chart(
    State(state): State<Arc<ProxyState>>,
    Path(ticker): Path<String>,
    Query(params): Query<IntradayParams>,
) -> ProxyResult {
    let data = state
        .provider
        .intraday_chart(
            &ticker,
            params.interval.as_deref(),
            params.pre_post.as_deref(),
        )
        .await
        .map_err(bad_gateway)?;
    Ok(Json(data))
}

/// GET /api/v1/chart/historical/{ticker}
pub async fn historical_chart(
    State(state): State<Arc<ProxyState>>,
    Path(ticker): Path<String>,
    Query(params): Query<HistoricalParams>,
) -> ProxyResult {
    let data = state
        .provider
        .historical_chart(&ticker, params.interval.as_deref(), params.range.as_deref())
        .await
        .map_err(bad_gateway)?;
    Ok(Json(data))
}

/// GET /api/v1/news/headlines/{ticker}
pub async fn news_headlines(
    State(state): State<Arc<ProxyState>>,
    Path(ticker): Path<String>,
) -> ProxyResult {
    let data = state
        .provider
        .news_headlines(&ticker)
        .await
        .map_err(bad_gateway)?;
    Ok(Json(data))
}

/// GET /api/v1/ticker/options/{ticker}
pub async fn option_chain(
    State(state): State<Arc<ProxyState>>,
    Path(ticker): Path<String>,
) -> ProxyResult {
    let data = state
        .provider
        .option_chain(&ticker)
        .await
        .map_err(bad_gateway)?;
    Ok(Json(data))
}

/// GET /api/v1/ticker/search/{term}
pub async fn ticker_search(
    State(state): State<Arc<ProxyState>>,
    Path(term): Path<String>,
    Query(params): Query<SearchParams>,
) -> ProxyResult {
    let data = state
        .provider
        .ticker_search(&term, params.region.as_deref(), params.lang.as_deref())
        .await
        .map_err(bad_gateway)?;
    Ok(Json(data))
}

/// Create the proxy routes for the gateway.
///
/// # Routes
///
/// - `GET /api/v1/quote/realtime/{tickers}` - Realtime quotes
/// - `GET /api/v1/chart/intraday/{ticker}` - Intraday chart data
/// - `GET /api/v1/chart/historical/{ticker}` - Historical chart data
/// - `GET /api/v1/news/headlines/{ticker}` - News headlines
/// - `GET /api/v1/ticker/options/{ticker}` - Option chain
/// - `GET /api/v1/ticker/search/{term}` - Ticker search
pub fn proxy_routes(state: Arc<ProxyState>) -> Router {
    Router::new()
        .route("/api/v1/quote/realtime/{tickers}", get(realtime_quotes))
        .route("/api/v1/chart/intraday/{ticker}", get(intraday_chart))
        .route("/api/v1/chart/historical/{ticker}", get(historical_chart))
        .route("/api/v1/news/headlines/{ticker}", get(news_headlines))
        .route("/api/v1/ticker/options/{ticker}", get(option_chain))
        .route("/api/v1/ticker/search/{term}", get(ticker_search))
        .with_state(state)
}
