//! Tickergate gateway binary
//!
//! Entry point for the market-data aggregation gateway: parses the CLI,
//! loads and validates the configuration, wires the catalog service and
//! upstream proxy into one router, and runs the HTTP server until
//! shutdown.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::routing::get;
use axum::{Json, Router};
use catalog::api::{catalog_routes, CatalogApiState};
use catalog::{CacheStore, CatalogBuilder, CatalogService, CsvSourceReader, MemoryCache};
use cli::{Cli, Commands};
use config::{generate_default_config, load_config, save_config, validate_config, GatewayConfig};
use observability::{init_logging, LogFormat};
use server::{health_handler, HealthState, HttpServer, ServerConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use upstream::{proxy_routes, ProviderClient, ProxyState};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Start {
            config,
            host,
            port,
            log_format,
        } => start_gateway(config, host, port, &log_format).await,
        Commands::Validate { config } => validate_command(config),
        Commands::Init { output } => init_command(output),
    }
}

async fn start_gateway(
    config_path: PathBuf,
    host_override: Option<String>,
    port_override: Option<u16>,
    log_format: &str,
) -> Result<()> {
    let format = LogFormat::parse(log_format)
        .with_context(|| format!("unknown log format: {log_format}"))?;
    init_logging("tickergate", format)?;

    info!("Tickergate starting...");

    let config = load_config(&config_path)?;
    let report = validate_config(&config);

    for warning in &report.warnings {
        warn!(field = %warning.field, message = %warning.message, "Configuration warning");
    }

    if !report.is_valid() {
        error!(
            error_count = report.errors.len(),
            "Configuration validation failed"
        );
        for err in &report.errors {
            error!("{err}");
        }
        anyhow::bail!("Cannot start gateway due to configuration errors");
    }

    let host = host_override.unwrap_or_else(|| config.server.host.clone());
    let port = port_override.unwrap_or(config.server.port);

    let router = build_router(&config)?;

    info!(
        %host,
        port,
        sources = config.sources.len(),
        upstream = %config.upstream.base_url,
        "Starting gateway"
    );

    let server = HttpServer::new(ServerConfig::new(host, port), router);
    server.run_with_ctrl_c().await?;

    info!("Gateway stopped");
    Ok(())
}

/// Compose the full gateway router: catalog views, upstream proxy, health,
/// root banner, CORS and request tracing.
fn build_router(config: &GatewayConfig) -> Result<Router> {
    let cache: Arc<dyn CacheStore> = Arc::new(MemoryCache::new());
    let reader = Arc::new(CsvSourceReader::new(Duration::from_secs(
        config.catalog.read_timeout_secs,
    )));
    let builder = CatalogBuilder::new(config.sources.clone(), reader);
    let service = CatalogService::new(builder, cache);
    let catalog_state = Arc::new(CatalogApiState::new(service));

    let provider = ProviderClient::new(
        &config.upstream.base_url,
        Duration::from_secs(config.upstream.timeout_secs),
        config.upstream.api_key.as_deref(),
    )?;
    let proxy_state = Arc::new(ProxyState { provider });

    let health_state = Arc::new(HealthState::new(
        config.gateway.name.clone(),
        env!("CARGO_PKG_VERSION"),
    ));
    let health = Router::new()
        .route("/health", get(health_handler))
        .with_state(health_state);

    let service_name = config.gateway.name.clone();
    let index = Router::new().route(
        "/",
        get(move || {
            let service_name = service_name.clone();
            async move {
                Json(serde_json::json!({
                    "status": "ok",
                    "service": service_name,
                    "version": env!("CARGO_PKG_VERSION"),
                    "api": "/api/v1",
                }))
            }
        }),
    );

    let router = Router::new()
        .merge(index)
        .merge(health)
        .merge(catalog_routes(catalog_state))
        .merge(proxy_routes(proxy_state))
        .layer(cors_layer(config.server.cors_origin.as_deref())?)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}

fn cors_layer(origin: Option<&str>) -> Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    Ok(match origin {
        Some(origin) => layer.allow_origin(
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin: {origin}"))?,
        ),
        None => layer.allow_origin(Any),
    })
}

fn validate_command(config_path: PathBuf) -> Result<()> {
    init_logging("tickergate", LogFormat::Pretty)?;

    let config = load_config(&config_path)?;
    let report = validate_config(&config);

    for warning in &report.warnings {
        warn!(field = %warning.field, message = %warning.message, "Configuration warning");
    }

    if !report.is_valid() {
        for err in &report.errors {
            error!("{err}");
        }
        anyhow::bail!("Configuration is invalid ({} errors)", report.errors.len());
    }

    println!("Configuration {} is valid", config_path.display());
    Ok(())
}

fn init_command(output: PathBuf) -> Result<()> {
    init_logging("tickergate", LogFormat::Pretty)?;

    if Path::new(&output).exists() {
        anyhow::bail!("refusing to overwrite existing file {}", output.display());
    }

    let config = generate_default_config();
    save_config(&config, &output)?;

    println!("Wrote default configuration to {}", output.display());
    Ok(())
}
