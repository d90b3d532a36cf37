//! HTTP client for the upstream market-data provider.
//!
//! The provider is an opaque collaborator: responses are handed through as
//! raw JSON values keyed by ticker symbol(s), interval and range, and the
//! gateway never depends on their shape.

use crate::error::{UpstreamError, UpstreamResult};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const API_KEY_HEADER: &str = "x-api-key";

/// Client for forwarding market-data calls to the upstream provider.
#[derive(Clone, Debug)]
pub struct ProviderClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProviderClient {
    /// Create a new client for the provider at `base_url`.
    ///
    /// When the provider requires an API key it is sent on every request
    /// as the `x-api-key` header.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        api_key: Option<&str>,
    ) -> UpstreamResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| UpstreamError::Config("API key is not a valid header value".into()))?;
            headers.insert(API_KEY_HEADER, value);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL of the provider.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> UpstreamResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "forwarding request to upstream provider");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Realtime quotes for one or more comma-separated tickers.
    pub async fn realtime_quotes(&self, tickers: &str) -> UpstreamResult<Value> {
        self.get_json(&format!("/quote/realtime/{tickers}"), &[]).await
    }

    /// Intraday chart data.
    pub async fn intraday_chart(
        &self,
        ticker: &str,
        interval: Option<&str>,
        pre_post: Option<&str>,
    ) -> UpstreamResult<Value> {
        let mut query = Vec::new();
        if let Some(interval) = interval {
            query.push(("interval", interval));
        }
        if let Some(pre_post) = pre_post {
            query.push(("prePost", pre_post));
        }
        self.get_json(&format!("/chart/intraday/{ticker}"), &query).await
    }

    /// Historical chart data.
    pub async fn historical_chart(
        &self,
        ticker: &str,
        interval: Option<&str>,
        range: Option<&str>,
    ) -> UpstreamResult<Value> {
        let mut query = Vec::new();
        if let Some(interval) = interval {
            query.push(("interval", interval));
        }
        if let Some(range) = range {
            query.push(("range", range));
        }
        self.get_json(&format!("/chart/historical/{ticker}"), &query).await
    }

    /// News headlines for a ticker.
    pub async fn news_headlines(&self, ticker: &str) -> UpstreamResult<Value> {
        self.get_json(&format!("/news/headlines/{ticker}"), &[]).await
    }

    /// Option chain for a ticker.
    pub async fn option_chain(&self, ticker: &str) -> UpstreamResult<Value> {
        self.get_json(&format!("/ticker/options/{ticker}"), &[]).await
    }

    /// Free-text ticker search.
    pub async fn ticker_search(
        &self,
        term: &str,
        region: Option<&str>,
        lang: Option<&str>,
    ) -> UpstreamResult<Value> {
        let mut query = Vec::new();
        if let Some(region) = region {
            query.push(("region", region));
        }
        if let Some(lang) = lang {
            query.push(("lang", lang));
        }
        self.get_json(&format!("/ticker/search/{term}"), &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client =
            ProviderClient::new("http://127.0.0.1:8100/", Duration::from_secs(5), None).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8100");
    }

    #[test]
    fn invalid_api_key_is_a_config_error() {
        let err = ProviderClient::new(
            "http://127.0.0.1:8100",
            Duration::from_secs(5),
            Some("bad\nkey"),
        )
        .unwrap_err();
        assert!(matches!(err, UpstreamError::Config(_)));
    }
}
