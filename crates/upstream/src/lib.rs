//! Upstream market-data provider integration.
//!
//! This crate owns the gateway's only outbound dependency: the remote
//! market-data provider serving quotes, charts, news, option chains and
//! ticker search. Calls are forwarded verbatim and responses are passed
//! through as opaque JSON.
//!
//! ## Modules
//!
//! - `client` - reqwest wrapper over the provider API
//! - `api` - axum proxy handlers and routes
//! - `error` - error types

pub mod api;
pub mod client;
pub mod error;

pub use api::{proxy_routes, ProxyState};
pub use client::ProviderClient;
pub use error::{UpstreamError, UpstreamResult};
