//! Configuration validation.
//!
//! Validation distinguishes hard errors (the gateway cannot start) from
//! warnings (suspicious but survivable, e.g. a source file that does not
//! exist yet at validation time).

use crate::GatewayConfig;
use std::collections::HashSet;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("No instrument source files configured")]
    NoSources,

    #[error("Server port must not be 0")]
    InvalidServerPort,

    #[error("Invalid upstream base URL '{url}': {message}")]
    InvalidUpstreamUrl { url: String, message: String },

    #[error("Upstream base URL scheme must be http or https, got '{0}'")]
    UnsupportedUpstreamScheme(String),

    #[error("upstream.timeout_secs must be a positive integer")]
    InvalidUpstreamTimeout,

    #[error("catalog.read_timeout_secs must be a positive integer")]
    InvalidReadTimeout,
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a gateway configuration.
pub fn validate_config(config: &GatewayConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if config.sources.is_empty() {
        report.errors.push(ValidationError::NoSources);
    }

    if config.server.port == 0 {
        report.errors.push(ValidationError::InvalidServerPort);
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) => {
            let scheme = url.scheme();
            if scheme != "http" && scheme != "https" {
                report
                    .errors
                    .push(ValidationError::UnsupportedUpstreamScheme(
                        scheme.to_string(),
                    ));
            }
        }
        Err(e) => {
            report.errors.push(ValidationError::InvalidUpstreamUrl {
                url: config.upstream.base_url.clone(),
                message: e.to_string(),
            });
        }
    }

    if config.upstream.timeout_secs == 0 {
        report.errors.push(ValidationError::InvalidUpstreamTimeout);
    }

    if config.catalog.read_timeout_secs == 0 {
        report.errors.push(ValidationError::InvalidReadTimeout);
    }

    let mut seen = HashSet::new();
    for source in &config.sources {
        if !seen.insert(source) {
            report.warnings.push(ValidationWarning {
                field: "sources".to_string(),
                message: format!("duplicate source path {}", source.display()),
            });
        }
        if !source.exists() {
            report.warnings.push(ValidationWarning {
                field: "sources".to_string(),
                message: format!("source file {} does not exist", source.display()),
            });
        }
    }

    report
}
