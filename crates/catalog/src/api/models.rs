//! API request/response models for the catalog endpoints.

use crate::types::{InstrumentRecord, Page, Sector};
use serde::{Deserialize, Serialize};

/// Query parameters for `GET /api/v1/tickers`.
///
/// `start` and `size` are taken as raw strings so a present-but-invalid
/// value (`?start=abc`, `?size=`) coerces to its default instead of
/// failing extraction; each parameter falls back independently.
#[derive(Debug, Default, Deserialize)]
pub struct ListTickersParams {
    pub start: Option<String>,
    pub size: Option<String>,
    pub sector: Option<String>,
}

impl ListTickersParams {
    /// Coerce the raw query values into a sanitized page.
    pub fn page(&self) -> Page {
        Page::from_raw(coerce(self.start.as_deref()), coerce(self.size.as_deref()))
    }
}

fn coerce(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse().ok())
}

/// Response for `GET /api/v1/tickers`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListTickersResponse {
    pub tickers: Vec<InstrumentRecord>,
}

/// Response for `GET /api/v1/sectors`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListSectorsResponse {
    pub sectors: Vec<Sector>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(start: Option<&str>, size: Option<&str>) -> ListTickersParams {
        ListTickersParams {
            start: start.map(String::from),
            size: size.map(String::from),
            sector: None,
        }
    }

    #[test]
    fn numeric_values_pass_through() {
        assert_eq!(params(Some("5"), Some("10")).page(), Page::new(5, 10));
    }

    #[test]
    fn absent_values_fall_back_to_defaults() {
        assert_eq!(params(None, None).page(), Page::new(0, 25));
    }

    #[test]
    fn non_numeric_and_empty_values_fall_back_per_parameter() {
        assert_eq!(params(Some("abc"), Some("10")).page(), Page::new(0, 10));
        assert_eq!(params(Some("5"), Some("")).page(), Page::new(5, 25));
        assert_eq!(params(Some(""), Some("xyz")).page(), Page::new(0, 25));
    }

    #[test]
    fn negative_and_zero_values_fall_back_per_parameter() {
        assert_eq!(params(Some("-1"), Some("10")).page(), Page::new(0, 10));
        assert_eq!(params(Some("5"), Some("0")).page(), Page::new(5, 25));
    }
}
