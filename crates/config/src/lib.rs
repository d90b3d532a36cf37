//! Gateway configuration types.
//!
//! The configuration is a single YAML document covering the server bind
//! address, the instrument source files, the upstream market-data provider
//! and the catalog read bound.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod parser;
pub mod validator;

pub use parser::{generate_default_config, load_config, save_config};
pub use validator::{validate_config, ValidationError, ValidationReport, ValidationWarning};

/// Top-level gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub gateway: GatewayInfo,
    #[serde(default)]
    pub server: ServerSettings,
    /// Instrument list files, one per exchange. Merge order follows this
    /// list.
    pub sources: Vec<PathBuf>,
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
}

/// Identity block for logs and the root banner.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayInfo {
    #[serde(default = "default_gateway_name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Default for GatewayInfo {
    fn default() -> Self {
        Self {
            name: default_gateway_name(),
            description: String::new(),
        }
    }
}

/// HTTP bind settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origin; any origin is allowed when unset.
    #[serde(default)]
    pub cors_origin: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: None,
        }
    }
}

/// Upstream market-data provider settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamSettings {
    /// Provider base URL (http or https).
    pub base_url: String,
    #[serde(default = "default_upstream_timeout")]
    pub timeout_secs: u64,
    /// Optional API key, sent as the `x-api-key` header.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Catalog build settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// Bound on a single source file read, in seconds.
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            read_timeout_secs: default_read_timeout(),
        }
    }
}

fn default_gateway_name() -> String {
    "tickergate".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_upstream_timeout() -> u64 {
    10
}

fn default_read_timeout() -> u64 {
    30
}
