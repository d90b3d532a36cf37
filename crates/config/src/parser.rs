//! Configuration loading and saving.

use crate::{CatalogSettings, GatewayConfig, GatewayInfo, ServerSettings, UpstreamSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Load a gateway configuration from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GatewayConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {path:?}"))?;

    debug!("Config file content length: {} bytes", content.len());

    let config: GatewayConfig =
        serde_yaml::from_str(&content).with_context(|| "Failed to parse YAML configuration")?;

    info!("Configuration loaded successfully");
    Ok(config)
}

/// The default configuration: the three classic exchange list files and a
/// local provider endpoint.
pub fn generate_default_config() -> GatewayConfig {
    GatewayConfig {
        gateway: GatewayInfo {
            name: "tickergate".to_string(),
            description: "Market-data aggregation gateway".to_string(),
        },
        server: ServerSettings::default(),
        sources: vec![
            PathBuf::from("tickers/companylist-nasdaq.csv"),
            PathBuf::from("tickers/companylist-nyse.csv"),
            PathBuf::from("tickers/companylist-amex.csv"),
        ],
        upstream: UpstreamSettings {
            base_url: "http://127.0.0.1:8100".to_string(),
            timeout_secs: 10,
            api_key: None,
        },
        catalog: CatalogSettings::default(),
    }
}

/// Serialize a configuration to a YAML file.
pub fn save_config<P: AsRef<Path>>(config: &GatewayConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Saving configuration to: {:?}", path);

    let yaml = serde_yaml::to_string(config)
        .with_context(|| "Failed to serialize configuration to YAML")?;

    fs::write(path, yaml).with_context(|| format!("Failed to write config file: {path:?}"))?;

    info!("Configuration saved successfully");
    Ok(())
}
